//! The codec contract and its extension methods.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use json_tree::Node;

use crate::collection::{ListOf, MapOf, SetOf};
use crate::combinator::{Alternatively, Bounded, Checked, Mapped, Optional, TryMapped};
use crate::error::DecodeError;

/// Converts values of `T` to nodes and back.
///
/// `encode` is total. `decode` fails with a [`DecodeError`] whose path
/// locates the offending node relative to the one passed in.
pub trait Codec<T> {
    fn encode(&self, value: &T) -> Node;
    fn decode(&self, node: &Node) -> Result<T, DecodeError>;
}

/// A shareable, type-erased codec.
pub type BoxedCodec<T> = Arc<dyn Codec<T> + Send + Sync>;

impl<T, C: Codec<T> + ?Sized> Codec<T> for &C {
    fn encode(&self, value: &T) -> Node {
        (**self).encode(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        (**self).decode(node)
    }
}

impl<T, C: Codec<T> + ?Sized> Codec<T> for Box<C> {
    fn encode(&self, value: &T) -> Node {
        (**self).encode(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        (**self).decode(node)
    }
}

impl<T, C: Codec<T> + ?Sized> Codec<T> for Arc<C> {
    fn encode(&self, value: &T) -> Node {
        (**self).encode(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        (**self).decode(node)
    }
}

/// Combinators available on every codec.
pub trait CodecExt<T>: Codec<T> + Sized {
    /// Encodes a `Vec<T>` as an array, element by element.
    fn list_of(self) -> ListOf<Self, T> {
        ListOf::new(self, 0, usize::MAX)
    }

    /// Like [`list_of`](Self::list_of), but decoding requires between `min`
    /// and `max` elements inclusive.
    fn list_of_len(self, min: usize, max: usize) -> ListOf<Self, T> {
        ListOf::new(self, min, max)
    }

    /// Encodes a `BTreeSet<T>` as an array in ascending order. Duplicate
    /// elements collapse on decode.
    fn set_of(self) -> SetOf<Self, T>
    where
        T: Ord,
    {
        SetOf::new(self)
    }

    /// Encodes an `IndexMap<String, T>` as an object with the same key order.
    fn map_of(self) -> MapOf<Self, T> {
        MapOf::new(self)
    }

    /// `None` is `null`; anything else goes through this codec.
    fn optional(self) -> Optional<Self, T> {
        Optional::new(self)
    }

    fn map<A, D, E>(self, decode: D, encode: E) -> Mapped<Self, T, D, E>
    where
        D: Fn(T) -> A,
        E: Fn(&A) -> T,
    {
        Mapped::new(self, decode, encode)
    }

    /// Like [`map`](Self::map) with a decode step that can fail. The error's
    /// `Display` text becomes an [`Invalid`](crate::DecodeErrorKind::Invalid)
    /// message.
    fn try_map<A, M, D, E>(self, decode: D, encode: E) -> TryMapped<Self, T, D, E>
    where
        D: Fn(T) -> Result<A, M>,
        M: fmt::Display,
        E: Fn(&A) -> T,
    {
        TryMapped::new(self, decode, encode)
    }

    /// Rejects decoded values failing `predicate`. Encoding is unchecked.
    fn check<P>(self, predicate: P, message: impl Into<String>) -> Checked<Self, T, P>
    where
        P: Fn(&T) -> bool,
    {
        Checked::new(self, predicate, message.into())
    }

    /// Rejects decoded values outside `[min, max]`.
    fn in_range(self, min: T, max: T) -> Bounded<Self, T>
    where
        T: PartialOrd + fmt::Display,
    {
        Bounded::new(self, Some(min), Some(max))
    }

    fn at_most(self, max: T) -> Bounded<Self, T>
    where
        T: PartialOrd + fmt::Display,
    {
        Bounded::new(self, None, Some(max))
    }

    fn at_least(self, min: T) -> Bounded<Self, T>
    where
        T: PartialOrd + fmt::Display,
    {
        Bounded::new(self, Some(min), None)
    }

    /// Decodes with `other` when this codec fails. Encoding always uses
    /// this codec.
    fn alternatively<B>(self, other: B) -> Alternatively<Self, B, T>
    where
        B: Codec<T>,
    {
        Alternatively::new(self, other)
    }

    fn boxed(self) -> BoxedCodec<T>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

impl<T, C: Codec<T>> CodecExt<T> for C {}

// ---------------------------------------------------------------------------
// Function-backed codecs
// ---------------------------------------------------------------------------

/// A codec built from a pair of functions. See [`from_fns`].
pub struct FnCodec<T, E, D> {
    encode: E,
    decode: D,
    _marker: PhantomData<fn() -> T>,
}

/// Builds a codec from an encode and a decode function.
pub fn from_fns<T, E, D>(encode: E, decode: D) -> FnCodec<T, E, D>
where
    E: Fn(&T) -> Node,
    D: Fn(&Node) -> Result<T, DecodeError>,
{
    FnCodec {
        encode,
        decode,
        _marker: PhantomData,
    }
}

impl<T, E, D> Codec<T> for FnCodec<T, E, D>
where
    E: Fn(&T) -> Node,
    D: Fn(&Node) -> Result<T, DecodeError>,
{
    fn encode(&self, value: &T) -> Node {
        (self.encode)(value)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        (self.decode)(node)
    }
}

/// A codec that only encodes. See [`encode_only`].
pub struct EncodeOnly<T, E> {
    encode: E,
    _marker: PhantomData<fn() -> T>,
}

/// Wraps an encode function; every decode fails.
pub fn encode_only<T, E>(encode: E) -> EncodeOnly<T, E>
where
    E: Fn(&T) -> Node,
{
    EncodeOnly {
        encode,
        _marker: PhantomData,
    }
}

impl<T, E> Codec<T> for EncodeOnly<T, E>
where
    E: Fn(&T) -> Node,
{
    fn encode(&self, value: &T) -> Node {
        (self.encode)(value)
    }

    fn decode(&self, _node: &Node) -> Result<T, DecodeError> {
        Err(DecodeError::invalid("codec does not decode"))
    }
}

/// A codec that only decodes. See [`decode_only`].
pub struct DecodeOnly<T, D> {
    decode: D,
    _marker: PhantomData<fn() -> T>,
}

/// Wraps a decode function. Encoding writes `null`, so the result belongs in
/// the second position of [`CodecExt::alternatively`], behind a codec that
/// writes the current format:
///
/// ```
/// use json_tree::Node;
/// use json_tree_codec::{decode_only, Codec, CodecExt, DecodeError, I64};
///
/// // Older documents stored the value as a string.
/// let legacy = decode_only(|node: &Node| {
///     node.as_str()?
///         .parse::<i64>()
///         .map_err(|e| DecodeError::invalid(e.to_string()))
/// });
/// let codec = I64.alternatively(legacy);
/// assert_eq!(codec.decode(&Node::string("42")).unwrap(), 42);
/// assert_eq!(codec.encode(&42), Node::from(42));
/// ```
pub fn decode_only<T, D>(decode: D) -> DecodeOnly<T, D>
where
    D: Fn(&Node) -> Result<T, DecodeError>,
{
    DecodeOnly {
        decode,
        _marker: PhantomData,
    }
}

impl<T, D> Codec<T> for DecodeOnly<T, D>
where
    D: Fn(&Node) -> Result<T, DecodeError>,
{
    fn encode(&self, _value: &T) -> Node {
        Node::NULL
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        (self.decode)(node)
    }
}

/// A type that knows its own node representation.
pub trait NodeEncodable: Sized {
    fn to_node(&self) -> Node;
    fn from_node(node: &Node) -> Result<Self, DecodeError>;
}

/// Codec delegating to a [`NodeEncodable`] implementation.
pub struct EncodableCodec<T>(PhantomData<fn() -> T>);

pub fn encodable<T: NodeEncodable>() -> EncodableCodec<T> {
    EncodableCodec(PhantomData)
}

impl<T: NodeEncodable> Codec<T> for EncodableCodec<T> {
    fn encode(&self, value: &T) -> Node {
        value.to_node()
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        T::from_node(node)
    }
}

impl<T> Clone for EncodableCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EncodableCodec<T> {}
