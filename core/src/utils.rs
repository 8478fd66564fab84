use std::fmt;
use num_enum::TryFromPrimitive;

/// Render a raw registry value as its enum variant name, or as hex when unknown.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Number of bytes needed to hold `bits` prefix bits.
#[inline]
pub const fn prefix_bytes(bits: u8) -> usize {
    (bits as usize + 7) / 8
}
