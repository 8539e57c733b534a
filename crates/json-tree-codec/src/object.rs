//! Product codecs: one object key per field, any number of fields.
//!
//! Fields are registered on an [`ObjectCodecBuilder`], each returning a typed
//! [`FieldSlot`]. The constructor passed to [`ObjectCodecBuilder::build`]
//! pulls decoded values out of [`DecodedFields`] through those slots:
//!
//! ```
//! use json_tree::parse;
//! use json_tree_codec::{Codec, ObjectCodec, I32, STRING};
//!
//! #[derive(Debug, PartialEq)]
//! struct Label {
//!     text: String,
//!     size: i32,
//! }
//!
//! let mut builder = ObjectCodec::<Label>::builder();
//! let text = builder.field("text", STRING, |l: &Label| &l.text);
//! let size = builder.field_or("size", I32, 12, |l: &Label| &l.size);
//! let codec = builder.build(move |fields| {
//!     Ok(Label {
//!         text: fields.take(text)?,
//!         size: fields.take(size)?,
//!     })
//! });
//!
//! let label = codec.decode(&parse(r#"{"text":"hi"}"#).unwrap()).unwrap();
//! assert_eq!(label, Label { text: "hi".into(), size: 12 });
//! assert_eq!(codec.encode(&label).to_string(), r#"{"text":"hi","size":12}"#);
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use json_tree::{Node, Object};
use tracing::trace;

use crate::codec::Codec;
use crate::error::DecodeError;

/// Distinguishes builders, so a slot only opens the fields of the codec that
/// issued it.
static NEXT_BUILDER_ID: AtomicU64 = AtomicU64::new(0);

/// Typed handle to one field's decoded value.
pub struct FieldSlot<F> {
    owner: u64,
    index: usize,
    _marker: PhantomData<fn() -> F>,
}

impl<F> Clone for FieldSlot<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FieldSlot<F> {}

impl<F> fmt::Debug for FieldSlot<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSlot")
            .field("owner", &self.owner)
            .field("index", &self.index)
            .finish()
    }
}

/// The decoded field values of one object, handed to the constructor.
pub struct DecodedFields<'a> {
    owner: u64,
    keys: Vec<&'a str>,
    values: Vec<Option<Box<dyn Any>>>,
}

impl DecodedFields<'_> {
    /// Moves a field's value out. Each slot can be taken once, and only from
    /// the codec whose builder issued it.
    pub fn take<F: 'static>(&mut self, slot: FieldSlot<F>) -> Result<F, DecodeError> {
        if slot.owner != self.owner {
            return Err(DecodeError::invalid(
                "field slot belongs to another object codec",
            ));
        }
        let key = self.keys.get(slot.index).copied().unwrap_or("?");
        let value = self
            .values
            .get_mut(slot.index)
            .and_then(Option::take)
            .ok_or_else(|| DecodeError::invalid(format!("field `{key}` was already taken")))?;
        value
            .downcast::<F>()
            .map(|value| *value)
            .map_err(|_| DecodeError::invalid(format!("field `{key}` holds a different type")))
    }
}

enum Fallback<F> {
    Required,
    With(Box<dyn Fn() -> F + Send + Sync>),
}

trait FieldDescriptor<T>: Send + Sync {
    fn key(&self) -> &str;
    fn is_required(&self) -> bool;
    fn encode_into(&self, value: &T, object: &mut Object);
    fn decode_from(&self, object: &Object) -> Result<Box<dyn Any>, DecodeError>;
}

struct Field<T, F, C, A> {
    key: String,
    codec: C,
    accessor: A,
    fallback: Fallback<F>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F, C, A> FieldDescriptor<T> for Field<T, F, C, A>
where
    F: 'static,
    C: Codec<F> + Send + Sync,
    A: Fn(&T) -> &F + Send + Sync,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn is_required(&self) -> bool {
        matches!(self.fallback, Fallback::Required)
    }

    fn encode_into(&self, value: &T, object: &mut Object) {
        object.insert(self.key.as_str(), self.codec.encode((self.accessor)(value)));
    }

    fn decode_from(&self, object: &Object) -> Result<Box<dyn Any>, DecodeError> {
        let value = match (object.get(&self.key), &self.fallback) {
            (Some(node), _) => self.codec.decode(node)?,
            (None, Fallback::With(default)) => default(),
            (None, Fallback::Required) => {
                return Err(DecodeError::missing_keys(vec![self.key.clone()]))
            }
        };
        Ok(Box::new(value))
    }
}

struct OptionalField<T, F, C, A> {
    key: String,
    codec: C,
    accessor: A,
    _marker: PhantomData<fn(&T) -> F>,
}

impl<T, F, C, A> FieldDescriptor<T> for OptionalField<T, F, C, A>
where
    F: 'static,
    C: Codec<F> + Send + Sync,
    A: Fn(&T) -> &Option<F> + Send + Sync,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn is_required(&self) -> bool {
        false
    }

    fn encode_into(&self, value: &T, object: &mut Object) {
        if let Some(field) = (self.accessor)(value) {
            object.insert(self.key.as_str(), self.codec.encode(field));
        }
    }

    fn decode_from(&self, object: &Object) -> Result<Box<dyn Any>, DecodeError> {
        let value: Option<F> = match object.get(&self.key) {
            Some(node) if !node.is_null() => Some(self.codec.decode(node)?),
            _ => None,
        };
        Ok(Box::new(value))
    }
}

type Constructor<T> = Box<dyn Fn(&mut DecodedFields<'_>) -> Result<T, DecodeError> + Send + Sync>;

/// Codec for a record type, encoded as an object with one key per field.
///
/// Decoding ignores keys no field claims. Every absent required key is
/// reported in a single [`MissingKeys`](crate::DecodeErrorKind::MissingKeys)
/// error; a field that fails to decode is reported with its key prefixed
/// onto the error path.
pub struct ObjectCodec<T> {
    owner: u64,
    fields: Vec<Box<dyn FieldDescriptor<T>>>,
    construct: Constructor<T>,
}

impl<T: 'static> ObjectCodec<T> {
    pub fn builder() -> ObjectCodecBuilder<T> {
        ObjectCodecBuilder::new()
    }
}

impl<T> ObjectCodec<T> {
    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.key())
    }

    fn decode_object(&self, object: &Object) -> Result<T, DecodeError> {
        let missing: Vec<String> = self
            .fields
            .iter()
            .filter(|field| field.is_required() && !object.contains_key(field.key()))
            .map(|field| field.key().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DecodeError::missing_keys(missing));
        }

        let mut decoded = DecodedFields {
            owner: self.owner,
            keys: self.fields.iter().map(|field| field.key()).collect(),
            values: Vec::with_capacity(self.fields.len()),
        };
        for field in &self.fields {
            let value = field
                .decode_from(object)
                .map_err(|e| e.at_key(field.key()))?;
            decoded.values.push(Some(value));
        }
        (self.construct)(&mut decoded)
    }
}

impl<T> Codec<T> for ObjectCodec<T> {
    fn encode(&self, value: &T) -> Node {
        let mut object = Object::with_capacity(self.fields.len());
        for field in &self.fields {
            field.encode_into(value, &mut object);
        }
        Node::Object(object)
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        let object = node.as_object()?;
        self.decode_object(object).map_err(|err| {
            trace!(pointer = %err.pointer(), error = %err, "object decode failed");
            err
        })
    }
}

impl<T> fmt::Debug for ObjectCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCodec")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects field descriptors for an [`ObjectCodec`].
pub struct ObjectCodecBuilder<T> {
    owner: u64,
    fields: Vec<Box<dyn FieldDescriptor<T>>>,
}

impl<T: 'static> ObjectCodecBuilder<T> {
    pub fn new() -> Self {
        Self {
            owner: NEXT_BUILDER_ID.fetch_add(1, Ordering::Relaxed),
            fields: Vec::new(),
        }
    }

    fn push<F>(&mut self, field: Box<dyn FieldDescriptor<T>>) -> FieldSlot<F> {
        self.fields.push(field);
        FieldSlot {
            owner: self.owner,
            index: self.fields.len() - 1,
            _marker: PhantomData,
        }
    }

    /// A required field.
    pub fn field<F, C, A>(&mut self, key: &str, codec: C, accessor: A) -> FieldSlot<F>
    where
        F: 'static,
        C: Codec<F> + Send + Sync + 'static,
        A: Fn(&T) -> &F + Send + Sync + 'static,
    {
        self.with_fallback(key, codec, accessor, Fallback::Required)
    }

    /// A field that decodes to `default` when its key is absent.
    pub fn field_or<F, C, A>(
        &mut self,
        key: &str,
        codec: C,
        default: F,
        accessor: A,
    ) -> FieldSlot<F>
    where
        F: Clone + Send + Sync + 'static,
        C: Codec<F> + Send + Sync + 'static,
        A: Fn(&T) -> &F + Send + Sync + 'static,
    {
        self.with_fallback(
            key,
            codec,
            accessor,
            Fallback::With(Box::new(move || default.clone())),
        )
    }

    /// A field that calls `default` when its key is absent.
    pub fn field_or_else<F, C, D, A>(
        &mut self,
        key: &str,
        codec: C,
        default: D,
        accessor: A,
    ) -> FieldSlot<F>
    where
        F: 'static,
        C: Codec<F> + Send + Sync + 'static,
        D: Fn() -> F + Send + Sync + 'static,
        A: Fn(&T) -> &F + Send + Sync + 'static,
    {
        self.with_fallback(key, codec, accessor, Fallback::With(Box::new(default)))
    }

    /// A field that is `None` when its key is absent or `null`, and is left
    /// out of the encoded object when `None`.
    pub fn optional_field<F, C, A>(
        &mut self,
        key: &str,
        codec: C,
        accessor: A,
    ) -> FieldSlot<Option<F>>
    where
        F: 'static,
        C: Codec<F> + Send + Sync + 'static,
        A: Fn(&T) -> &Option<F> + Send + Sync + 'static,
    {
        self.push(Box::new(OptionalField {
            key: key.to_string(),
            codec,
            accessor,
            _marker: PhantomData,
        }))
    }

    fn with_fallback<F, C, A>(
        &mut self,
        key: &str,
        codec: C,
        accessor: A,
        fallback: Fallback<F>,
    ) -> FieldSlot<F>
    where
        F: 'static,
        C: Codec<F> + Send + Sync + 'static,
        A: Fn(&T) -> &F + Send + Sync + 'static,
    {
        self.push(Box::new(Field {
            key: key.to_string(),
            codec,
            accessor,
            fallback,
            _marker: PhantomData,
        }))
    }

    /// Finishes the codec. `construct` receives the decoded fields of every
    /// successfully decoded object.
    pub fn build<K>(self, construct: K) -> ObjectCodec<T>
    where
        K: Fn(&mut DecodedFields<'_>) -> Result<T, DecodeError> + Send + Sync + 'static,
    {
        ObjectCodec {
            owner: self.owner,
            fields: self.fields,
            construct: Box::new(construct),
        }
    }
}

impl<T: 'static> Default for ObjectCodecBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
