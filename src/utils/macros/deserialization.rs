//! Case-insensitive deserialization for adjacently tagged enums
//!
//! Configuration files are written by hand, so `{"type": "Plain", ...}` and
//! `{"type": "plain", ...}` must mean the same thing.

/// Implements `Deserialize` for an enum serialized as `{"type": ..., "value": ...}` whose
/// variants each wrap a value convertible from `String`.
///
/// The `type` tag is matched against the given lowercase names ignoring case.
/// Keys other than `type` and `value` are rejected.
#[macro_export]
macro_rules! impl_case_insensitive_enum {
	($enum_name:ident, { $($variant_str:expr => $variant:ident),* $(,)? }) => {
		impl<'de> ::serde::Deserialize<'de> for $enum_name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: ::serde::Deserializer<'de>,
			{
				use ::serde::de::Error as _;

				#[derive(::serde::Deserialize)]
				#[serde(deny_unknown_fields)]
				struct Tagged {
					#[serde(rename = "type")]
					kind: String,
					value: String,
				}

				let Tagged { kind, value } = <Tagged as ::serde::Deserialize>::deserialize(deserializer)?;

				match kind.to_lowercase().as_str() {
					$(
						$variant_str => Ok($enum_name::$variant(value.into())),
					)*
					_ => Err(D::Error::unknown_variant(&kind, &[$($variant_str),*])),
				}
			}
		}
	};
}
