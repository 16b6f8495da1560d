//! Built-in Schedule I tables.

use crate::catalog::{CatalogBuilder, Conversion};
use crate::effect::{EffectSet, Multiplier};
use crate::id::EffectId;

/// (name, multiplier in hundredths), indexed by effect id.
const EFFECTS: [(&str, u32); 35] = [
    ("disorienting", 0),
    ("explosive", 0),
    ("laxative", 0),
    ("lethal", 0),
    ("paranoia", 0),
    ("schizophrenic", 0),
    ("seizure", 0),
    ("smelly", 0),
    ("toxic", 0),
    ("calming", 10),
    ("munchies", 12),
    ("refreshing", 14),
    ("focused", 16),
    ("euphoric", 18),
    ("gingeritis", 20),
    ("energizing", 22),
    ("sneaky", 24),
    ("sedating", 26),
    ("caloriedense", 28),
    ("balding", 30),
    ("athletic", 32),
    ("slippery", 34),
    ("foggy", 36),
    ("spicy", 38),
    ("brighteyed", 40),
    ("jennerising", 42),
    ("thoughtprovoking", 44),
    ("tropicthunder", 46),
    ("glowie", 48),
    ("electrifying", 50),
    ("giraffying", 52),
    ("antigravity", 54),
    ("cyclopean", 56),
    ("zombifying", 58),
    ("shrinking", 60),
];

// Conversion lists are (from, to) and run top to bottom. The "n, 1st/2nd"
// markers pair rules whose relative order decides the outcome when both
// sources are present.

const CUKE: &[(u8, u8)] = &[
    (10, 20),
    (22, 32),
    (21, 10),
    (16, 4),
    (14, 26),
    (8, 13), // 0, 1st
    (13, 2), // 0, 2nd
];

const BANANA: &[(u8, u8)] = &[
    (7, 31),
    (4, 25),
    (30, 11),
    (8, 7),
    (9, 16),
    (0, 12),  // 0, 1st
    (12, 6),  // 0, 2nd
    (15, 26), // 1, 1st
    (32, 15), // 1, 2nd
];

const PARACETAMOL: &[(u8, u8)] = &[
    (10, 31),
    (29, 20),
    (23, 24),
    (12, 14),
    (9, 21),  // 0, 1st
    (22, 9),  // 0, 2nd
    (26, 8),  // 1, 1st
    (8, 27),  // 1, 2nd
    (15, 4),  // 2, 1st
    (4, 19),  // 2, 2nd
];

const DONUT: &[(u8, u8)] = &[(34, 15), (12, 13), (18, 1), (25, 14), (31, 21), (19, 16)];

const VIAGRA: &[(u8, u8)] = &[(13, 24), (2, 9), (20, 16), (0, 8)];

const MOUTH_WASH: &[(u8, u8)] = &[(9, 31), (12, 25), (1, 17), (18, 16)];

const FLU_MEDICINE: &[(u8, u8)] = &[
    (32, 22),
    (26, 14),
    (34, 4),
    (30, 11),
    (9, 24),  // 0, 1st
    (12, 9),  // 0, 2nd
    (20, 10), // 1, 1st
    (10, 21), // 1, 2nd
    (2, 13),  // 2, 1st
    (13, 8),  // 2, 2nd
];

const GASOLINE: &[(u8, u8)] = &[
    (4, 9),
    (34, 12),
    (2, 22),
    (10, 17),
    (14, 7),
    (0, 28),  // 0, 1st
    (29, 0),  // 0, 2nd
    (15, 13), // 1, 1st
    (13, 23), // 1, 2nd
    (25, 16), // 2, 1st
    (16, 27), // 2, 2nd
];

const ENERGY_DRINK: &[(u8, u8)] = &[
    (5, 19),
    (22, 2),
    (17, 10),
    (12, 34),
    (27, 16),
    (13, 15), // 0, 1st
    (23, 13), // 0, 2nd
    (28, 0),  // 1, 1st
    (0, 29),  // 1, 2nd
];

const MOTOR_OIL: &[(u8, u8)] = &[
    (4, 31),
    (13, 17),
    (22, 8),
    (15, 10), // 0, 1st
    (10, 5),  // 0, 2nd
];

const MEGA_BEAN: &[(u8, u8)] = &[
    (34, 29),
    (20, 2),
    (25, 4),
    (21, 8),
    (6, 12),  // 0, 1st
    (12, 0),  // 0, 2nd
    (15, 32), // 1, 1st
    (26, 15), // 1, 2nd
    (9, 28),  // 2, 1st
    (16, 9),  // 2, 2nd
];

const CHILI: &[(u8, u8)] = &[(16, 24), (20, 13), (2, 30), (34, 11), (10, 8), (31, 27)];

const BATTERY: &[(u8, u8)] = &[
    (2, 18),
    (32, 28),
    (34, 10),
    (31, 27),
    (13, 33), // 0, 1st
    (29, 13), // 0, 2nd
];

const IODINE: &[(u8, u8)] = &[(18, 14), (22, 4), (9, 17), (13, 6), (8, 16), (11, 26)];

const ADDY: &[(u8, u8)] = &[(30, 29), (22, 15), (1, 13), (17, 14), (28, 11)];

const HORSE_SEMEN: &[(u8, u8)] = &[(31, 9), (26, 29), (14, 11)];

/// (name, cost, main effect, conversions), indexed by mixin id.
const MIXINS: [(&str, u32, u8, &[(u8, u8)]); 16] = [
    ("cuke", 2, 15, CUKE),
    ("banana", 2, 14, BANANA),
    ("paracetamol", 3, 16, PARACETAMOL),
    ("donut", 3, 18, DONUT),
    ("viagra", 4, 27, VIAGRA),
    ("mouth_wash", 4, 19, MOUTH_WASH),
    ("flu_medicine", 5, 17, FLU_MEDICINE),
    ("gasoline", 5, 8, GASOLINE),
    ("energy_drink", 6, 20, ENERGY_DRINK),
    ("motor_oil", 6, 20, MOTOR_OIL),
    ("mega_bean", 7, 22, MEGA_BEAN),
    ("chili", 7, 23, CHILI),
    ("battery", 8, 24, BATTERY),
    ("iodine", 8, 25, IODINE),
    ("addy", 9, 26, ADDY),
    ("horse_semen", 9, 30, HORSE_SEMEN),
];

/// (name, cost, base value, starting effects), indexed by substance id.
const SUBSTANCES: [(&str, u32, u32, &[u8]); 6] = [
    ("og_kush", 0, 35, &[9]),
    ("sour_diesel", 0, 35, &[11]),
    ("green_crack", 0, 35, &[15]),
    ("grandaddy_purple", 0, 35, &[17]),
    ("methamphetamine", 0, 70, &[]),
    ("cocaine", 0, 150, &[]),
];

/// A builder pre-loaded with the built-in tables.
pub(crate) fn builder() -> CatalogBuilder {
    let mut b = CatalogBuilder::new();

    for (name, hundredths) in EFFECTS {
        b.register_effect(name, Multiplier::from_hundredths(hundredths));
    }

    for (name, cost, effect, rules) in MIXINS {
        let conversions = rules
            .iter()
            .map(|&(from, to)| Conversion::new(EffectId(from), EffectId(to)))
            .collect();
        b.register_mixin(name, cost, EffectId(effect), conversions);
    }

    for (name, cost, value, effects) in SUBSTANCES {
        let effects: EffectSet = effects.iter().map(|&id| EffectId(id)).collect();
        b.register_substance(name, cost, value, effects);
    }

    b
}
