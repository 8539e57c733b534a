//! Bidirectional codecs between Rust values and [`json_tree::Node`] trees.
//!
//! A [`Codec<T>`] encodes `T` into a node and decodes it back, reporting
//! failures as a [`DecodeError`] that carries the JSON Pointer path of the
//! offending node. Codecs compose:
//!
//! - scalar constants such as [`I32`], [`STRING`] or [`BIG_DECIMAL`];
//! - [`CodecExt`] combinators for lists, sets, maps, optionality, mapping,
//!   checks and fallbacks;
//! - [`ObjectCodec`] for records with any number of fields.
//!
//! ```
//! use json_tree::parse;
//! use json_tree_codec::{Codec, CodecExt, I32_RANGE, U8};
//!
//! let bytes = U8.list_of();
//! assert_eq!(bytes.decode(&parse("[1, 0x2, 3]").unwrap()).unwrap(), [1, 2, 3]);
//!
//! let err = bytes.decode(&parse("[1, 256]").unwrap()).unwrap_err();
//! assert_eq!(err.pointer(), "/1");
//!
//! assert_eq!(I32_RANGE.encode(&(0..=9)).to_string(), r#"{"from":0,"to":9}"#);
//! ```

mod codec;
mod collection;
mod combinator;
mod enumeration;
mod error;
mod object;
mod primitive;
mod range;
mod string;

pub use codec::{
    decode_only, encodable, encode_only, from_fns, BoxedCodec, Codec, CodecExt, DecodeOnly,
    EncodableCodec, EncodeOnly, FnCodec, NodeEncodable,
};
pub use collection::{ListOf, MapOf, SetOf};
pub use combinator::{Alternatively, Bounded, Checked, Mapped, Optional, TryMapped};
pub use enumeration::{enumeration, EnumCodec};
pub use error::{DecodeError, DecodeErrorKind, PathSegment};
pub use object::{DecodedFields, FieldSlot, ObjectCodec, ObjectCodecBuilder};
pub use primitive::{
    CharCodec, NodeCodec, PrimitiveCodec, ShowStringCodec, BIG_DECIMAL, BIG_INT, BOOL, CHAR, F32,
    F64, I128, I16, I32, I64, I8, NODE, NUMERIC, SHOW_STRING, STRING, U128, U16, U32, U64, U8,
};
pub use range::{
    closed_range_of, open_range_of, ClosedRangeCodec, OpenRangeCodec, I32_RANGE, I32_RANGE_OPEN,
    I64_RANGE, I64_RANGE_OPEN, U32_RANGE, U32_RANGE_OPEN, U64_RANGE, U64_RANGE_OPEN,
};
pub use string::{string_len, string_matching, StringLenCodec, StringMatchingCodec};
