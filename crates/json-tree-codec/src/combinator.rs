//! Codecs wrapping another codec: optionality, mapping, checks and
//! fallbacks.

use std::fmt;
use std::marker::PhantomData;

use json_tree::Node;

use crate::codec::Codec;
use crate::error::{DecodeError, DecodeErrorKind};

/// See [`CodecExt::optional`](crate::CodecExt::optional).
#[derive(Debug, Clone, Copy)]
pub struct Optional<C, T> {
    inner: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> Optional<C, T> {
    pub(crate) fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T> Codec<Option<T>> for Optional<C, T> {
    fn encode(&self, value: &Option<T>) -> Node {
        match value {
            Some(value) => self.inner.encode(value),
            None => Node::NULL,
        }
    }

    fn decode(&self, node: &Node) -> Result<Option<T>, DecodeError> {
        if node.is_null() {
            return Ok(None);
        }
        self.inner.decode(node).map(Some)
    }
}

/// See [`CodecExt::map`](crate::CodecExt::map).
pub struct Mapped<C, N, D, E> {
    inner: C,
    decode: D,
    encode: E,
    _marker: PhantomData<fn() -> N>,
}

impl<C, N, D, E> Mapped<C, N, D, E> {
    pub(crate) fn new(inner: C, decode: D, encode: E) -> Self {
        Self {
            inner,
            decode,
            encode,
            _marker: PhantomData,
        }
    }
}

impl<C, N, A, D, E> Codec<A> for Mapped<C, N, D, E>
where
    C: Codec<N>,
    D: Fn(N) -> A,
    E: Fn(&A) -> N,
{
    fn encode(&self, value: &A) -> Node {
        self.inner.encode(&(self.encode)(value))
    }

    fn decode(&self, node: &Node) -> Result<A, DecodeError> {
        self.inner.decode(node).map(&self.decode)
    }
}

/// See [`CodecExt::try_map`](crate::CodecExt::try_map).
pub struct TryMapped<C, N, D, E> {
    inner: C,
    decode: D,
    encode: E,
    _marker: PhantomData<fn() -> N>,
}

impl<C, N, D, E> TryMapped<C, N, D, E> {
    pub(crate) fn new(inner: C, decode: D, encode: E) -> Self {
        Self {
            inner,
            decode,
            encode,
            _marker: PhantomData,
        }
    }
}

impl<C, N, A, M, D, E> Codec<A> for TryMapped<C, N, D, E>
where
    C: Codec<N>,
    D: Fn(N) -> Result<A, M>,
    M: fmt::Display,
    E: Fn(&A) -> N,
{
    fn encode(&self, value: &A) -> Node {
        self.inner.encode(&(self.encode)(value))
    }

    fn decode(&self, node: &Node) -> Result<A, DecodeError> {
        let inner = self.inner.decode(node)?;
        (self.decode)(inner).map_err(|e| DecodeError::invalid(e.to_string()))
    }
}

/// See [`CodecExt::check`](crate::CodecExt::check).
pub struct Checked<C, T, P> {
    inner: C,
    predicate: P,
    message: String,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T, P> Checked<C, T, P> {
    pub(crate) fn new(inner: C, predicate: P, message: String) -> Self {
        Self {
            inner,
            predicate,
            message,
            _marker: PhantomData,
        }
    }
}

impl<C, T, P> Codec<T> for Checked<C, T, P>
where
    C: Codec<T>,
    P: Fn(&T) -> bool,
{
    fn encode(&self, value: &T) -> Node {
        self.inner.encode(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        let value = self.inner.decode(node)?;
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            Err(DecodeError::invalid(self.message.clone()))
        }
    }
}

/// Inclusive bounds on decoded values. See
/// [`CodecExt::in_range`](crate::CodecExt::in_range).
#[derive(Debug, Clone)]
pub struct Bounded<C, T> {
    inner: C,
    min: Option<T>,
    max: Option<T>,
}

impl<C, T> Bounded<C, T> {
    pub(crate) fn new(inner: C, min: Option<T>, max: Option<T>) -> Self {
        Self { inner, min, max }
    }
}

impl<C, T> Codec<T> for Bounded<C, T>
where
    C: Codec<T>,
    T: PartialOrd + fmt::Display,
{
    fn encode(&self, value: &T) -> Node {
        self.inner.encode(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        let value = self.inner.decode(node)?;
        let below = self.min.as_ref().is_some_and(|min| value < *min);
        let above = self.max.as_ref().is_some_and(|max| value > *max);
        match (&self.min, &self.max) {
            (Some(min), Some(max)) if below || above => Err(DecodeError::invalid(format!(
                "value {value} out of range [{min}, {max}]"
            ))),
            (Some(min), None) if below => Err(DecodeError::invalid(format!(
                "value {value} below limit {min}"
            ))),
            (None, Some(max)) if above => Err(DecodeError::invalid(format!(
                "value {value} above limit {max}"
            ))),
            _ => Ok(value),
        }
    }
}

/// See [`CodecExt::alternatively`](crate::CodecExt::alternatively).
#[derive(Debug, Clone, Copy)]
pub struct Alternatively<A, B, T> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> T>,
}

impl<A, B, T> Alternatively<A, B, T> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<A, B, T> Codec<T> for Alternatively<A, B, T>
where
    A: Codec<T>,
    B: Codec<T>,
{
    fn encode(&self, value: &T) -> Node {
        self.first.encode(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        let first = match self.first.decode(node) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        let second = match self.second.decode(node) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        // Chained alternatives report one flat list.
        let mut failures = match first {
            DecodeError {
                path,
                kind: DecodeErrorKind::NoAlternative(nested),
            } if path.is_empty() => nested,
            other => vec![other],
        };
        failures.push(second);
        Err(DecodeError::new(DecodeErrorKind::NoAlternative(failures)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodecExt, CHAR, F64, I32, STRING, U8};
    use json_tree::parse;

    #[derive(Debug, PartialEq)]
    struct Port(u16);

    #[test]
    fn optional_maps_null_to_none() {
        let codec = I32.optional();
        assert_eq!(codec.decode(&Node::NULL).unwrap(), None);
        assert_eq!(codec.decode(&Node::from(4)).unwrap(), Some(4));
        assert_eq!(codec.encode(&None), Node::NULL);
        assert_eq!(codec.encode(&Some(4)), Node::from(4));
        assert!(codec.decode(&Node::FALSE).is_err());
    }

    #[test]
    fn map_converts_both_ways() {
        let codec = I32.map(|v: i32| Port(v as u16), |p: &Port| i32::from(p.0));
        assert_eq!(codec.decode(&Node::from(8080)).unwrap(), Port(8080));
        assert_eq!(codec.encode(&Port(22)), Node::from(22));
    }

    #[test]
    fn try_map_failures_become_invalid() {
        let codec = I32.try_map(
            |v: i32| u16::try_from(v).map(Port),
            |p: &Port| i32::from(p.0),
        );
        assert_eq!(codec.decode(&Node::from(443)).unwrap(), Port(443));
        let err = codec.decode(&Node::from(-1)).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Invalid(_)));
    }

    #[test]
    fn check_rejects_on_decode_only() {
        let even = I32.check(|v: &i32| v % 2 == 0, "expected an even number");
        assert_eq!(even.decode(&Node::from(4)).unwrap(), 4);
        assert_eq!(
            even.decode(&Node::from(3)).unwrap_err().to_string(),
            "expected an even number"
        );
        assert_eq!(even.encode(&3), Node::from(3));
    }

    #[test]
    fn bound_messages() {
        let cases = [
            (I32.in_range(1, 10).decode(&Node::from(11)), "value 11 out of range [1, 10]"),
            (I32.in_range(1, 10).decode(&Node::from(0)), "value 0 out of range [1, 10]"),
            (I32.at_most(5).decode(&Node::from(6)), "value 6 above limit 5"),
            (I32.at_least(5).decode(&Node::from(4)), "value 4 below limit 5"),
        ];
        for (result, message) in cases {
            assert_eq!(result.unwrap_err().to_string(), message);
        }
        assert_eq!(I32.in_range(1, 10).decode(&Node::from(10)).unwrap(), 10);
        assert_eq!(I32.at_most(5).decode(&Node::from(5)).unwrap(), 5);
        assert_eq!(I32.at_least(5).decode(&Node::from(5)).unwrap(), 5);
        assert_eq!(F64.in_range(0.0, 1.0).decode(&parse("0.5").unwrap()).unwrap(), 0.5);
    }

    #[test]
    fn alternatives_fall_through_in_order() {
        let codec = U8.map(|b: u8| char::from(b), |c: &char| *c as u8).alternatively(CHAR);
        assert_eq!(codec.decode(&Node::from(65)).unwrap(), 'A');
        assert_eq!(codec.decode(&Node::string("z")).unwrap(), 'z');
        assert_eq!(codec.encode(&'A'), Node::from(65));
    }

    #[test]
    fn chained_alternatives_flatten_failures() {
        let codec = I32
            .map(|v: i32| v.to_string(), |s: &String| s.len() as i32)
            .alternatively(STRING.check(|s: &String| s.len() < 3, "too long"))
            .alternatively(STRING.check(|s: &String| s.starts_with('x'), "no x"));
        let err = codec.decode(&Node::string("abcd")).unwrap_err();
        match err.kind {
            DecodeErrorKind::NoAlternative(failures) => assert_eq!(failures.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(codec.decode(&Node::string("xyzw")).unwrap(), "xyzw");
    }
}
