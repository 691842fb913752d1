use tracing::warn;
use uuid::Uuid;

use crate::lsf::bytes::{Cursor, push_cstring, push_len_prefixed, text_from_bytes};
use crate::lsf::value::{TranslatedFsArgument, TranslatedFsString, TranslatedString, Value};
use crate::lsf::{DataTypeTag, LsfError, Result};

/// Nesting ceiling for translated format-string arguments.
const MAX_FS_DEPTH: u32 = 16;

/// Decode one raw attribute payload according to its tag byte.
///
/// Tags outside the known domain become [`Value::Unrecognized`]; known tags with a payload
/// too short for their layout become [`Value::Malformed`]. Neither case is an error.
pub fn decode_value(tag: u8, raw: &[u8]) -> Value {
	let Some(known) = DataTypeTag::from_u8(tag) else {
		return Value::Unrecognized { tag, raw: raw.to_vec() };
	};

	match decode_known(known, raw) {
		Ok(value) => value,
		Err(err) => {
			warn!(tag = known.as_str(), len = raw.len(), %err, "malformed attribute payload");
			Value::Malformed { tag: known, raw: raw.to_vec() }
		}
	}
}

fn decode_known(tag: DataTypeTag, raw: &[u8]) -> Result<Value> {
	let mut cursor = Cursor::new(raw);
	Ok(match tag {
		DataTypeTag::None => Value::None,
		DataTypeTag::UInt8 => Value::UInt8(cursor.read_u8()?),
		DataTypeTag::Int16 => Value::Int16(cursor.read_i16()?),
		DataTypeTag::UInt16 => Value::UInt16(cursor.read_u16()?),
		DataTypeTag::Int32 => Value::Int32(cursor.read_i32()?),
		DataTypeTag::UInt32 => Value::UInt32(cursor.read_u32()?),
		DataTypeTag::Float => Value::Float(cursor.read_f32()?),
		DataTypeTag::Double => Value::Double(cursor.read_f64()?),
		DataTypeTag::IVec2 => Value::IVec2(cursor.read_i32s()?),
		DataTypeTag::IVec3 => Value::IVec3(cursor.read_i32s()?),
		DataTypeTag::IVec4 => Value::IVec4(cursor.read_i32s()?),
		DataTypeTag::Vec2 => Value::Vec2(cursor.read_f32s()?),
		DataTypeTag::Vec3 => Value::Vec3(cursor.read_f32s()?),
		DataTypeTag::Vec4 => Value::Vec4(cursor.read_f32s()?),
		DataTypeTag::Mat2 => Value::Mat2(cursor.read_f32s()?),
		DataTypeTag::Mat3 => Value::Mat3(cursor.read_f32s()?),
		DataTypeTag::Mat3x4 => Value::Mat3x4(cursor.read_f32s()?),
		DataTypeTag::Mat4x3 => Value::Mat4x3(cursor.read_f32s()?),
		DataTypeTag::Mat4 => Value::Mat4(cursor.read_f32s()?),
		DataTypeTag::Bool => Value::Bool(cursor.read_u8()? != 0),
		DataTypeTag::String => Value::String(text_from_bytes(raw)),
		DataTypeTag::Path => Value::Path(text_from_bytes(raw)),
		DataTypeTag::FixedString => Value::FixedString(text_from_bytes(raw)),
		DataTypeTag::LsString => Value::LsString(text_from_bytes(raw)),
		DataTypeTag::UInt64 => Value::UInt64(cursor.read_u64()?),
		DataTypeTag::ScratchBuffer => Value::ScratchBuffer(raw.to_vec()),
		DataTypeTag::Long => Value::Long(cursor.read_i64()?),
		DataTypeTag::Int8 => Value::Int8(cursor.read_i8()?),
		DataTypeTag::TranslatedString => {
			let version = cursor.read_u16()?;
			let handle = text_from_bytes(cursor.read_len_prefixed()?);
			Value::TranslatedString(TranslatedString { version, handle })
		}
		DataTypeTag::WString => Value::WString(text_from_bytes(raw)),
		DataTypeTag::LsWString => Value::LsWString(text_from_bytes(raw)),
		DataTypeTag::Uuid => {
			let raw = cursor.read_exact(16)?;
			let mut bytes = [0_u8; 16];
			bytes.copy_from_slice(raw);
			Value::Uuid(uuid_key(bytes))
		}
		DataTypeTag::Int64 => Value::Int64(cursor.read_i64()?),
		DataTypeTag::TranslatedFsString => Value::TranslatedFsString(read_fs_string(&mut cursor, 0)?),
	})
}

fn read_fs_string(cursor: &mut Cursor<'_>, depth: u32) -> Result<TranslatedFsString> {
	let version = cursor.read_u16()?;
	let handle = text_from_bytes(cursor.read_len_prefixed()?);
	let count = cursor.read_i32()?;

	if count > 0 && depth >= MAX_FS_DEPTH {
		return Err(LsfError::NestingTooDeep { max_depth: MAX_FS_DEPTH });
	}

	let mut arguments = Vec::new();
	for _ in 0..count.max(0) {
		let key = text_from_bytes(cursor.read_len_prefixed()?);
		let string = read_fs_string(cursor, depth + 1)?;
		let value = text_from_bytes(cursor.read_len_prefixed()?);
		arguments.push(TranslatedFsArgument { key, string, value });
	}

	Ok(TranslatedFsString { version, handle, arguments })
}

/// Canonical 36-character key for a stored GUID (first three groups little-endian).
pub fn uuid_key(bytes: [u8; 16]) -> Box<str> {
	Uuid::from_bytes_le(bytes).hyphenated().to_string().into_boxed_str()
}

/// Encode a value into its tag byte and raw payload.
///
/// A UUID value whose text does not parse is stored as 16 zero bytes.
pub fn encode_value(value: &Value) -> (u8, Vec<u8>) {
	let mut out = Vec::new();
	match value {
		Value::None => {}
		Value::UInt8(v) => out.push(*v),
		Value::Int16(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::UInt16(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::Int32(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::UInt32(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::Float(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::Double(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::IVec2(v) => push_i32s(&mut out, v),
		Value::IVec3(v) => push_i32s(&mut out, v),
		Value::IVec4(v) => push_i32s(&mut out, v),
		Value::Vec2(v) => push_f32s(&mut out, v),
		Value::Vec3(v) => push_f32s(&mut out, v),
		Value::Vec4(v) => push_f32s(&mut out, v),
		Value::Mat2(v) => push_f32s(&mut out, v),
		Value::Mat3(v) => push_f32s(&mut out, v),
		Value::Mat3x4(v) | Value::Mat4x3(v) => push_f32s(&mut out, v),
		Value::Mat4(v) => push_f32s(&mut out, v),
		Value::Bool(v) => out.push(u8::from(*v)),
		Value::String(text)
		| Value::Path(text)
		| Value::FixedString(text)
		| Value::LsString(text)
		| Value::WString(text)
		| Value::LsWString(text) => push_cstring(&mut out, text),
		Value::UInt64(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::ScratchBuffer(bytes) => out.extend_from_slice(bytes),
		Value::Long(v) | Value::Int64(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::Int8(v) => out.extend_from_slice(&v.to_le_bytes()),
		Value::TranslatedString(item) => {
			out.extend_from_slice(&item.version.to_le_bytes());
			push_len_prefixed(&mut out, &item.handle);
		}
		Value::Uuid(text) => {
			let bytes = Uuid::parse_str(text).map(|id| id.to_bytes_le()).unwrap_or([0_u8; 16]);
			out.extend_from_slice(&bytes);
		}
		Value::TranslatedFsString(item) => push_fs_string(&mut out, item),
		Value::Unrecognized { raw, .. } | Value::Malformed { raw, .. } => out.extend_from_slice(raw),
	}

	(value.tag(), out)
}

fn push_i32s(out: &mut Vec<u8>, items: &[i32]) {
	for item in items {
		out.extend_from_slice(&item.to_le_bytes());
	}
}

fn push_f32s(out: &mut Vec<u8>, items: &[f32]) {
	for item in items {
		out.extend_from_slice(&item.to_le_bytes());
	}
}

fn push_fs_string(out: &mut Vec<u8>, item: &TranslatedFsString) {
	out.extend_from_slice(&item.version.to_le_bytes());
	push_len_prefixed(out, &item.handle);
	let count = i32::try_from(item.arguments.len()).unwrap_or(i32::MAX);
	out.extend_from_slice(&count.to_le_bytes());
	for arg in &item.arguments {
		push_len_prefixed(out, &arg.key);
		push_fs_string(out, &arg.string);
		push_len_prefixed(out, &arg.value);
	}
}
