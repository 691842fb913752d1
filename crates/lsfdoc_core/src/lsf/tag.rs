use serde::{Serialize, Serializer};

/// Attribute storage type tag as written in the attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DataTypeTag {
	/// No payload.
	None = 0x00,
	/// Unsigned 8-bit integer.
	UInt8 = 0x01,
	/// Signed 16-bit integer.
	Int16 = 0x02,
	/// Unsigned 16-bit integer.
	UInt16 = 0x03,
	/// Signed 32-bit integer.
	Int32 = 0x04,
	/// Unsigned 32-bit integer.
	UInt32 = 0x05,
	/// 32-bit float.
	Float = 0x06,
	/// 64-bit float.
	Double = 0x07,
	/// Two `i32` components.
	IVec2 = 0x08,
	/// Three `i32` components.
	IVec3 = 0x09,
	/// Four `i32` components.
	IVec4 = 0x0A,
	/// Two `f32` components.
	Vec2 = 0x0B,
	/// Three `f32` components.
	Vec3 = 0x0C,
	/// Four `f32` components.
	Vec4 = 0x0D,
	/// 2x2 `f32` matrix.
	Mat2 = 0x0E,
	/// 3x3 `f32` matrix.
	Mat3 = 0x0F,
	/// 3x4 `f32` matrix.
	Mat3x4 = 0x10,
	/// 4x3 `f32` matrix.
	Mat4x3 = 0x11,
	/// 4x4 `f32` matrix.
	Mat4 = 0x12,
	/// Boolean byte.
	Bool = 0x13,
	/// Plain string.
	String = 0x14,
	/// Resource path string.
	Path = 0x15,
	/// Interned string.
	FixedString = 0x16,
	/// Engine string.
	LsString = 0x17,
	/// Unsigned 64-bit integer.
	UInt64 = 0x18,
	/// Opaque byte buffer.
	ScratchBuffer = 0x19,
	/// Legacy signed 64-bit integer.
	Long = 0x1A,
	/// Signed 8-bit integer.
	Int8 = 0x1B,
	/// Localization handle with version.
	TranslatedString = 0x1C,
	/// Wide string.
	WString = 0x1D,
	/// Wide engine string.
	LsWString = 0x1E,
	/// 16-byte identifier.
	Uuid = 0x1F,
	/// Signed 64-bit integer.
	Int64 = 0x20,
	/// Localization handle with nested format arguments.
	TranslatedFsString = 0x21,
}

impl DataTypeTag {
	/// Highest tag value with a known layout.
	pub const MAX: u8 = 0x21;

	/// Map a raw tag byte to a known tag.
	pub fn from_u8(raw: u8) -> Option<Self> {
		Some(match raw {
			0x00 => Self::None,
			0x01 => Self::UInt8,
			0x02 => Self::Int16,
			0x03 => Self::UInt16,
			0x04 => Self::Int32,
			0x05 => Self::UInt32,
			0x06 => Self::Float,
			0x07 => Self::Double,
			0x08 => Self::IVec2,
			0x09 => Self::IVec3,
			0x0A => Self::IVec4,
			0x0B => Self::Vec2,
			0x0C => Self::Vec3,
			0x0D => Self::Vec4,
			0x0E => Self::Mat2,
			0x0F => Self::Mat3,
			0x10 => Self::Mat3x4,
			0x11 => Self::Mat4x3,
			0x12 => Self::Mat4,
			0x13 => Self::Bool,
			0x14 => Self::String,
			0x15 => Self::Path,
			0x16 => Self::FixedString,
			0x17 => Self::LsString,
			0x18 => Self::UInt64,
			0x19 => Self::ScratchBuffer,
			0x1A => Self::Long,
			0x1B => Self::Int8,
			0x1C => Self::TranslatedString,
			0x1D => Self::WString,
			0x1E => Self::LsWString,
			0x1F => Self::Uuid,
			0x20 => Self::Int64,
			0x21 => Self::TranslatedFsString,
			_ => return None,
		})
	}

	/// Raw tag byte.
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Stable upper-case label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "NONE",
			Self::UInt8 => "UINT8",
			Self::Int16 => "INT16",
			Self::UInt16 => "UINT16",
			Self::Int32 => "INT32",
			Self::UInt32 => "UINT32",
			Self::Float => "FLOAT",
			Self::Double => "DOUBLE",
			Self::IVec2 => "IVEC2",
			Self::IVec3 => "IVEC3",
			Self::IVec4 => "IVEC4",
			Self::Vec2 => "VEC2",
			Self::Vec3 => "VEC3",
			Self::Vec4 => "VEC4",
			Self::Mat2 => "MAT2",
			Self::Mat3 => "MAT3",
			Self::Mat3x4 => "MAT3X4",
			Self::Mat4x3 => "MAT4X3",
			Self::Mat4 => "MAT4",
			Self::Bool => "BOOL",
			Self::String => "STRING",
			Self::Path => "PATH",
			Self::FixedString => "FIXEDSTRING",
			Self::LsString => "LSSTRING",
			Self::UInt64 => "UINT64",
			Self::ScratchBuffer => "SCRATCHBUFFER",
			Self::Long => "LONG",
			Self::Int8 => "INT8",
			Self::TranslatedString => "TRANSLATEDSTRING",
			Self::WString => "WSTRING",
			Self::LsWString => "LSWSTRING",
			Self::Uuid => "UUID",
			Self::Int64 => "INT64",
			Self::TranslatedFsString => "TRANSLATEDFSSTRING",
		}
	}
}

impl Serialize for DataTypeTag {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}
