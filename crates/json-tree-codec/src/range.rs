//! Ranges encoded as `{"from": start, "to": end}`.

use std::marker::PhantomData;
use std::ops::{Range, RangeInclusive};

use json_tree::{Node, Object};

use crate::codec::Codec;
use crate::error::DecodeError;
use crate::primitive::{PrimitiveCodec, I32, I64, U32, U64};

const FROM: &str = "from";
const TO: &str = "to";

fn encode_bounds<C: Codec<T>, T>(codec: &C, from: &T, to: &T) -> Node {
    let mut object = Object::with_capacity(2);
    object.insert(FROM, codec.encode(from));
    object.insert(TO, codec.encode(to));
    Node::Object(object)
}

fn decode_bounds<C: Codec<T>, T>(codec: &C, node: &Node) -> Result<(T, T), DecodeError> {
    let object = node.as_object()?;
    let (Some(from), Some(to)) = (object.get(FROM), object.get(TO)) else {
        let missing = [FROM, TO]
            .into_iter()
            .filter(|key| !object.contains_key(key))
            .map(str::to_string)
            .collect();
        return Err(DecodeError::missing_keys(missing));
    };
    let from = codec.decode(from).map_err(|e| e.at_key(FROM))?;
    let to = codec.decode(to).map_err(|e| e.at_key(TO))?;
    Ok((from, to))
}

/// `RangeInclusive<T>`; `to` is the last value in the range.
#[derive(Debug, Clone, Copy)]
pub struct ClosedRangeCodec<C, T> {
    bound: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> ClosedRangeCodec<C, T> {
    pub const fn new(bound: C) -> Self {
        Self {
            bound,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T> Codec<RangeInclusive<T>> for ClosedRangeCodec<C, T> {
    fn encode(&self, value: &RangeInclusive<T>) -> Node {
        encode_bounds(&self.bound, value.start(), value.end())
    }

    fn decode(&self, node: &Node) -> Result<RangeInclusive<T>, DecodeError> {
        let (from, to) = decode_bounds(&self.bound, node)?;
        Ok(from..=to)
    }
}

/// `Range<T>`; `to` is the first value past the range.
#[derive(Debug, Clone, Copy)]
pub struct OpenRangeCodec<C, T> {
    bound: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> OpenRangeCodec<C, T> {
    pub const fn new(bound: C) -> Self {
        Self {
            bound,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T> Codec<Range<T>> for OpenRangeCodec<C, T> {
    fn encode(&self, value: &Range<T>) -> Node {
        encode_bounds(&self.bound, &value.start, &value.end)
    }

    fn decode(&self, node: &Node) -> Result<Range<T>, DecodeError> {
        let (from, to) = decode_bounds(&self.bound, node)?;
        Ok(from..to)
    }
}

pub fn closed_range_of<C: Codec<T>, T>(bound: C) -> ClosedRangeCodec<C, T> {
    ClosedRangeCodec::new(bound)
}

pub fn open_range_of<C: Codec<T>, T>(bound: C) -> OpenRangeCodec<C, T> {
    OpenRangeCodec::new(bound)
}

pub const I32_RANGE: ClosedRangeCodec<PrimitiveCodec<i32>, i32> = ClosedRangeCodec::new(I32);
pub const I64_RANGE: ClosedRangeCodec<PrimitiveCodec<i64>, i64> = ClosedRangeCodec::new(I64);
pub const U32_RANGE: ClosedRangeCodec<PrimitiveCodec<u32>, u32> = ClosedRangeCodec::new(U32);
pub const U64_RANGE: ClosedRangeCodec<PrimitiveCodec<u64>, u64> = ClosedRangeCodec::new(U64);

pub const I32_RANGE_OPEN: OpenRangeCodec<PrimitiveCodec<i32>, i32> = OpenRangeCodec::new(I32);
pub const I64_RANGE_OPEN: OpenRangeCodec<PrimitiveCodec<i64>, i64> = OpenRangeCodec::new(I64);
pub const U32_RANGE_OPEN: OpenRangeCodec<PrimitiveCodec<u32>, u32> = OpenRangeCodec::new(U32);
pub const U64_RANGE_OPEN: OpenRangeCodec<PrimitiveCodec<u64>, u64> = OpenRangeCodec::new(U64);
