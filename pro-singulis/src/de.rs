//! `Deserialize` for [`Input`]: sequences and maps keep their shape, every other
//! value becomes [`Input::Other`].
use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::iterable::Input;

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Input<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(InputVisitor(PhantomData))
    }
}

struct InputVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for InputVisitor<T> {
    type Value = Input<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Input<T>, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Input::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Input<T>, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, T>()? {
            entries.insert(key, value);
        }
        Ok(Input::Mapping(entries))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Input<T>, D::Error> {
        Input::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Input<T>, D::Error> {
        Input::deserialize(deserializer)
    }

    fn visit_enum<A: de::EnumAccess<'de>>(self, data: A) -> Result<Input<T>, A::Error> {
        IgnoredAny.visit_enum(data)?;
        Ok(Input::Other)
    }

    fn visit_none<E: de::Error>(self) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<Input<T>, E> {
        Ok(Input::Other)
    }
}
