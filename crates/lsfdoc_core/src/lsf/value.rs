use std::fmt;

use serde::Serialize;

use crate::lsf::DataTypeTag;

/// Decoded attribute value, one variant per [`DataTypeTag`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
	/// Empty payload.
	None,
	/// Unsigned 8-bit integer.
	UInt8(u8),
	/// Signed 16-bit integer.
	Int16(i16),
	/// Unsigned 16-bit integer.
	UInt16(u16),
	/// Signed 32-bit integer.
	Int32(i32),
	/// Unsigned 32-bit integer.
	UInt32(u32),
	/// 32-bit float.
	Float(f32),
	/// 64-bit float.
	Double(f64),
	/// Integer pair.
	IVec2([i32; 2]),
	/// Integer triple.
	IVec3([i32; 3]),
	/// Integer quadruple.
	IVec4([i32; 4]),
	/// Float pair.
	Vec2([f32; 2]),
	/// Float triple.
	Vec3([f32; 3]),
	/// Float quadruple.
	Vec4([f32; 4]),
	/// Row-major 2x2 matrix.
	Mat2([f32; 4]),
	/// Row-major 3x3 matrix.
	Mat3([f32; 9]),
	/// Row-major 3x4 matrix.
	Mat3x4([f32; 12]),
	/// Row-major 4x3 matrix.
	Mat4x3([f32; 12]),
	/// Row-major 4x4 matrix.
	Mat4([f32; 16]),
	/// Boolean flag.
	Bool(bool),
	/// Plain string.
	String(Box<str>),
	/// Resource path.
	Path(Box<str>),
	/// Interned string.
	FixedString(Box<str>),
	/// Engine string.
	LsString(Box<str>),
	/// Unsigned 64-bit integer.
	UInt64(u64),
	/// Opaque bytes.
	ScratchBuffer(Vec<u8>),
	/// Legacy signed 64-bit integer.
	Long(i64),
	/// Signed 8-bit integer.
	Int8(i8),
	/// Localization handle.
	TranslatedString(TranslatedString),
	/// Wide string.
	WString(Box<str>),
	/// Wide engine string.
	LsWString(Box<str>),
	/// Canonical hyphenated UUID text, compared only for equality.
	Uuid(Box<str>),
	/// Signed 64-bit integer.
	Int64(i64),
	/// Localization handle with format arguments.
	TranslatedFsString(TranslatedFsString),
	/// Tag byte outside the known domain, kept with its payload.
	Unrecognized {
		/// Raw tag byte.
		tag: u8,
		/// Raw payload bytes.
		raw: Vec<u8>,
	},
	/// Known tag whose payload did not fit its layout.
	Malformed {
		/// Declared tag.
		tag: DataTypeTag,
		/// Raw payload bytes.
		raw: Vec<u8>,
	},
}

/// Localization handle plus version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedString {
	/// Handle version.
	pub version: u16,
	/// Localization handle.
	pub handle: Box<str>,
}

/// Localization handle with nested format arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedFsString {
	/// Handle version.
	pub version: u16,
	/// Localization handle.
	pub handle: Box<str>,
	/// Format arguments in stored order.
	pub arguments: Vec<TranslatedFsArgument>,
}

/// One format argument of a [`TranslatedFsString`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedFsArgument {
	/// Argument key.
	pub key: Box<str>,
	/// Nested localized string.
	pub string: TranslatedFsString,
	/// Literal argument value.
	pub value: Box<str>,
}

impl Value {
	/// Tag byte this value is stored under.
	pub fn tag(&self) -> u8 {
		match self {
			Self::Unrecognized { tag, .. } => *tag,
			Self::Malformed { tag, .. } => tag.as_u8(),
			other => other.known_tag().map_or(0, DataTypeTag::as_u8),
		}
	}

	fn known_tag(&self) -> Option<DataTypeTag> {
		Some(match self {
			Self::None => DataTypeTag::None,
			Self::UInt8(_) => DataTypeTag::UInt8,
			Self::Int16(_) => DataTypeTag::Int16,
			Self::UInt16(_) => DataTypeTag::UInt16,
			Self::Int32(_) => DataTypeTag::Int32,
			Self::UInt32(_) => DataTypeTag::UInt32,
			Self::Float(_) => DataTypeTag::Float,
			Self::Double(_) => DataTypeTag::Double,
			Self::IVec2(_) => DataTypeTag::IVec2,
			Self::IVec3(_) => DataTypeTag::IVec3,
			Self::IVec4(_) => DataTypeTag::IVec4,
			Self::Vec2(_) => DataTypeTag::Vec2,
			Self::Vec3(_) => DataTypeTag::Vec3,
			Self::Vec4(_) => DataTypeTag::Vec4,
			Self::Mat2(_) => DataTypeTag::Mat2,
			Self::Mat3(_) => DataTypeTag::Mat3,
			Self::Mat3x4(_) => DataTypeTag::Mat3x4,
			Self::Mat4x3(_) => DataTypeTag::Mat4x3,
			Self::Mat4(_) => DataTypeTag::Mat4,
			Self::Bool(_) => DataTypeTag::Bool,
			Self::String(_) => DataTypeTag::String,
			Self::Path(_) => DataTypeTag::Path,
			Self::FixedString(_) => DataTypeTag::FixedString,
			Self::LsString(_) => DataTypeTag::LsString,
			Self::UInt64(_) => DataTypeTag::UInt64,
			Self::ScratchBuffer(_) => DataTypeTag::ScratchBuffer,
			Self::Long(_) => DataTypeTag::Long,
			Self::Int8(_) => DataTypeTag::Int8,
			Self::TranslatedString(_) => DataTypeTag::TranslatedString,
			Self::WString(_) => DataTypeTag::WString,
			Self::LsWString(_) => DataTypeTag::LsWString,
			Self::Uuid(_) => DataTypeTag::Uuid,
			Self::Int64(_) => DataTypeTag::Int64,
			Self::TranslatedFsString(_) => DataTypeTag::TranslatedFsString,
			Self::Unrecognized { .. } | Self::Malformed { .. } => return None,
		})
	}

	/// Stable kind label for diagnostics and output.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Unrecognized { .. } => "UNRECOGNIZED",
			Self::Malformed { .. } => "MALFORMED",
			other => other.known_tag().map_or("UNRECOGNIZED", DataTypeTag::as_str),
		}
	}

	/// Text of any string-like value, including UUID keys and translated handles.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text)
			| Self::Path(text)
			| Self::FixedString(text)
			| Self::LsString(text)
			| Self::WString(text)
			| Self::LsWString(text)
			| Self::Uuid(text) => Some(text),
			Self::TranslatedString(item) => Some(&item.handle),
			Self::TranslatedFsString(item) => Some(&item.handle),
			_ => None,
		}
	}

	/// Any integer value widened to `i64`; `UInt64` only when it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match *self {
			Self::UInt8(v) => Some(i64::from(v)),
			Self::Int8(v) => Some(i64::from(v)),
			Self::Int16(v) => Some(i64::from(v)),
			Self::UInt16(v) => Some(i64::from(v)),
			Self::Int32(v) => Some(i64::from(v)),
			Self::UInt32(v) => Some(i64::from(v)),
			Self::Long(v) | Self::Int64(v) => Some(v),
			Self::UInt64(v) => i64::try_from(v).ok(),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => f.write_str("none"),
			Self::UInt8(v) => write!(f, "{v}"),
			Self::Int16(v) => write!(f, "{v}"),
			Self::UInt16(v) => write!(f, "{v}"),
			Self::Int32(v) => write!(f, "{v}"),
			Self::UInt32(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Double(v) => write!(f, "{v}"),
			Self::IVec2(v) => write_components(f, v),
			Self::IVec3(v) => write_components(f, v),
			Self::IVec4(v) => write_components(f, v),
			Self::Vec2(v) => write_components(f, v),
			Self::Vec3(v) => write_components(f, v),
			Self::Vec4(v) => write_components(f, v),
			Self::Mat2(v) => write_components(f, v),
			Self::Mat3(v) => write_components(f, v),
			Self::Mat3x4(v) | Self::Mat4x3(v) => write_components(f, v),
			Self::Mat4(v) => write_components(f, v),
			Self::Bool(v) => write!(f, "{v}"),
			Self::String(text) | Self::Path(text) | Self::FixedString(text) | Self::LsString(text) | Self::WString(text) | Self::LsWString(text) => {
				write!(f, "{text:?}")
			}
			Self::UInt64(v) => write!(f, "{v}"),
			Self::ScratchBuffer(bytes) => write!(f, "<{} bytes>", bytes.len()),
			Self::Long(v) | Self::Int64(v) => write!(f, "{v}"),
			Self::Int8(v) => write!(f, "{v}"),
			Self::TranslatedString(item) => write!(f, "{};{}", item.handle, item.version),
			Self::Uuid(text) => f.write_str(text),
			Self::TranslatedFsString(item) => write!(f, "{};{} ({} args)", item.handle, item.version, item.arguments.len()),
			Self::Unrecognized { tag, raw } => write!(f, "<unrecognized tag 0x{tag:02x}, {} bytes>", raw.len()),
			Self::Malformed { tag, raw } => write!(f, "<malformed {}, {} bytes>", tag.as_str(), raw.len()),
		}
	}
}

fn write_components<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
	f.write_str("(")?;
	for (idx, item) in items.iter().enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{item}")?;
	}
	f.write_str(")")
}
