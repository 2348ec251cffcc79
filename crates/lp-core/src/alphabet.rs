/// Latin letters plus light punctuation — wide ink-density spread.
pub const ALPHABET_BASIC: &str = "MWNBQRkmwhaoenuszcrjlixvt?+=~-;:,'. ";

/// Hebrew block letters — the set the project was first tuned on.
pub const ALPHABET_HEBREW: &str = "אבגדהוזחטיכמנספצרשת. -+ם";

/// Digits only — coarse scale, strong texture.
pub const ALPHABET_DIGITS: &str = "0123456789. ";
