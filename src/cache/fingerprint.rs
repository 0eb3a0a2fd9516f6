use crate::foundation::error::{SheenError, SheenResult};

/// Interaction flavour a cached raster was rendered for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CacheVariant {
    /// Resting state.
    #[default]
    Normal,
    /// Pointer over the control.
    Hovered,
    /// Control held down or checked.
    Pressed,
    /// Control unavailable.
    Disabled,
}

impl CacheVariant {
    /// Number of variants.
    pub const COUNT: usize = 4;
    /// Every variant, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Normal,
        Self::Hovered,
        Self::Pressed,
        Self::Disabled,
    ];

    fn from_bits(bits: u128) -> Self {
        Self::ALL[bits as usize & (Self::COUNT - 1)]
    }
}

const VARIANT_BITS: u32 = 2;
const KIND_BITS: u32 = 5;
const SIZE_BITS: u32 = 15;
const FLAG_BITS: u32 = 1;
const COLOR_BITS: u32 = 32;

const VARIANT_SHIFT: u32 = 0;
const KIND_SHIFT: u32 = VARIANT_SHIFT + VARIANT_BITS;
const SIZE_A_SHIFT: u32 = KIND_SHIFT + KIND_BITS;
const SIZE_B_SHIFT: u32 = SIZE_A_SHIFT + SIZE_BITS;
const HORIZONTAL_SHIFT: u32 = SIZE_B_SHIFT + SIZE_BITS;
const PIXMAP_SHIFT: u32 = HORIZONTAL_SHIFT + FLAG_BITS;
const COLOR_SHIFT: u32 = PIXMAP_SHIFT + FLAG_BITS;
const KEY_BITS: u32 = COLOR_SHIFT + COLOR_BITS;

/// Largest size a fingerprint can carry.
pub const MAX_FINGERPRINT_SIZE: i32 = (1 << SIZE_BITS) - 1;
/// Number of distinct widget kinds a fingerprint can carry.
pub const MAX_FINGERPRINT_KINDS: usize = 1 << KIND_BITS;

const _: () = assert!(CacheVariant::COUNT <= 1 << VARIANT_BITS);
const _: () = assert!(KEY_BITS <= u128::BITS);

const fn mask(bits: u32) -> u128 {
    (1u128 << bits) - 1
}

/// The rendering-relevant inputs of one cached raster.
///
/// Every field is range-checked on construction, so two fingerprints encode to the same
/// [`PackedKey`] only when they are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheFingerprint {
    variant: CacheVariant,
    kind: u8,
    size_a: u16,
    size_b: u16,
    horizontal: bool,
    pixmap: bool,
    color: u32,
}

impl CacheFingerprint {
    /// Build a fingerprint.
    ///
    /// `kind` must be below [`MAX_FINGERPRINT_KINDS`] and both sizes within
    /// `0..=MAX_FINGERPRINT_SIZE`; anything else is rejected rather than truncated.
    pub fn new(
        variant: CacheVariant,
        kind: u8,
        size_a: i32,
        size_b: i32,
        horizontal: bool,
        pixmap: bool,
        color: u32,
    ) -> SheenResult<Self> {
        if usize::from(kind) >= MAX_FINGERPRINT_KINDS {
            return Err(SheenError::validation(format!(
                "widget kind {kind} does not fit the cache key"
            )));
        }
        let size = |name: &str, v: i32| -> SheenResult<u16> {
            if (0..=MAX_FINGERPRINT_SIZE).contains(&v) {
                Ok(v as u16)
            } else {
                Err(SheenError::validation(format!(
                    "{name} {v} outside cacheable range 0..={MAX_FINGERPRINT_SIZE}"
                )))
            }
        };
        Ok(Self {
            variant,
            kind,
            size_a: size("size_a", size_a)?,
            size_b: size("size_b", size_b)?,
            horizontal,
            pixmap,
            color,
        })
    }

    /// Interaction variant.
    pub fn variant(&self) -> CacheVariant {
        self.variant
    }

    /// Widget kind discriminant.
    pub fn kind(&self) -> u8 {
        self.kind
    }

    /// Primary size (length along the gradient axis).
    pub fn size_a(&self) -> i32 {
        i32::from(self.size_a)
    }

    /// Secondary size.
    pub fn size_b(&self) -> i32 {
        i32::from(self.size_b)
    }

    /// Orientation flag.
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    /// Whether the entry is a framed tile set rather than a flat strip.
    pub fn pixmap(&self) -> bool {
        self.pixmap
    }

    /// Base color as `0xRRGGBBAA`.
    pub fn color(&self) -> u32 {
        self.color
    }

    /// Packed form used as the map key.
    pub fn key(&self) -> PackedKey {
        PackedKey::encode(self)
    }
}

/// Fixed-width integer encoding of a [`CacheFingerprint`].
///
/// | field      | offset | bits |
/// |------------|--------|------|
/// | variant    | 0      | 2    |
/// | kind       | 2      | 5    |
/// | size_a     | 7      | 15   |
/// | size_b     | 22     | 15   |
/// | horizontal | 37     | 1    |
/// | pixmap     | 38     | 1    |
/// | color      | 39     | 32   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedKey(u128);

impl PackedKey {
    /// Pack a fingerprint.
    pub fn encode(fp: &CacheFingerprint) -> Self {
        let field = |v: u128, bits: u32, shift: u32| (v & mask(bits)) << shift;
        Self(
            field(fp.variant as u128, VARIANT_BITS, VARIANT_SHIFT)
                | field(u128::from(fp.kind), KIND_BITS, KIND_SHIFT)
                | field(u128::from(fp.size_a), SIZE_BITS, SIZE_A_SHIFT)
                | field(u128::from(fp.size_b), SIZE_BITS, SIZE_B_SHIFT)
                | field(u128::from(fp.horizontal), FLAG_BITS, HORIZONTAL_SHIFT)
                | field(u128::from(fp.pixmap), FLAG_BITS, PIXMAP_SHIFT)
                | field(u128::from(fp.color), COLOR_BITS, COLOR_SHIFT),
        )
    }

    /// Recover the fingerprint a key was packed from.
    pub fn decode(self) -> CacheFingerprint {
        let field = |bits: u32, shift: u32| (self.0 >> shift) & mask(bits);
        CacheFingerprint {
            variant: CacheVariant::from_bits(field(VARIANT_BITS, VARIANT_SHIFT)),
            kind: field(KIND_BITS, KIND_SHIFT) as u8,
            size_a: field(SIZE_BITS, SIZE_A_SHIFT) as u16,
            size_b: field(SIZE_BITS, SIZE_B_SHIFT) as u16,
            horizontal: field(FLAG_BITS, HORIZONTAL_SHIFT) != 0,
            pixmap: field(FLAG_BITS, PIXMAP_SHIFT) != 0,
            color: field(COLOR_BITS, COLOR_SHIFT) as u32,
        }
    }

    /// Raw integer value.
    pub fn bits(self) -> u128 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/fingerprint.rs"]
mod tests;
