use crate::lsf::{LsfError, Result};

/// Simple bounded little-endian cursor over an attribute payload.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(LsfError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read `N` consecutive `i32` components.
	pub fn read_i32s<const N: usize>(&mut self) -> Result<[i32; N]> {
		let mut out = [0_i32; N];
		for item in &mut out {
			*item = self.read_i32()?;
		}
		Ok(out)
	}

	/// Read `N` consecutive `f32` components.
	pub fn read_f32s<const N: usize>(&mut self) -> Result<[f32; N]> {
		let mut out = [0.0_f32; N];
		for item in &mut out {
			*item = self.read_f32()?;
		}
		Ok(out)
	}

	/// Read an `i32` length prefix followed by that many bytes.
	pub fn read_len_prefixed(&mut self) -> Result<&'a [u8]> {
		let at = self.pos;
		let len = self.read_i32()?;
		let len = usize::try_from(len).map_err(|_| LsfError::NegativeLength { len, at })?;
		self.read_exact(len)
	}
}

/// Decode stored text: UTF-8 (lossy) with trailing NUL terminators removed.
pub fn text_from_bytes(bytes: &[u8]) -> Box<str> {
	let end = bytes.iter().rposition(|byte| *byte != 0).map_or(0, |pos| pos + 1);
	String::from_utf8_lossy(&bytes[..end]).into_owned().into_boxed_str()
}

/// Append `text` as a NUL-terminated byte string.
pub fn push_cstring(out: &mut Vec<u8>, text: &str) {
	out.extend_from_slice(text.as_bytes());
	out.push(0);
}

/// Append `text` as an `i32` length-prefixed NUL-terminated byte string.
pub fn push_len_prefixed(out: &mut Vec<u8>, text: &str) {
	let len = i32::try_from(text.len() + 1).unwrap_or(i32::MAX);
	out.extend_from_slice(&len.to_le_bytes());
	push_cstring(out, text);
}
