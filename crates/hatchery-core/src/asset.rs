// crates/hatchery-core/src/asset.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of weeks over which an unstaked egg rots, counted from its
/// rot-start week.
pub const ROT_WINDOW_WEEKS: u64 = 6;

/// Stable identifier of an emitted egg.
///
/// Identifiers are assigned sequentially in emission order and are never
/// reused within a run, so the value doubles as the egg's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "egg#{}", self.0)
    }
}

/// Cosmetic egg colour, derived from the emission week (`week mod 7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl ColorTag {
    /// All colours in week-index order.
    pub const ALL: [ColorTag; 7] = [
        ColorTag::Red,
        ColorTag::Orange,
        ColorTag::Yellow,
        ColorTag::Green,
        ColorTag::Blue,
        ColorTag::Indigo,
        ColorTag::Violet,
    ];

    /// The colour assigned to eggs emitted in `week`.
    pub fn for_week(week: u64) -> Self {
        Self::ALL[(week % 7) as usize]
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorTag::Red => "Red",
            ColorTag::Orange => "Orange",
            ColorTag::Yellow => "Yellow",
            ColorTag::Green => "Green",
            ColorTag::Blue => "Blue",
            ColorTag::Indigo => "Indigo",
            ColorTag::Violet => "Violet",
        };
        write!(f, "{}", name)
    }
}

/// Lifecycle states of an egg.
///
///   Active --> Rotted   (decay reaches 1.0)
///     |
///     +-----> Hatched  (stake completes)
///
/// Rotted and Hatched are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetState {
    /// Emitted and still decaying (or reserved by a stake).
    Active,
    /// Converted into one derivative token by a completed stake.
    Hatched,
    /// Fully decayed without being hatched.
    Rotted,
}

impl AssetState {
    /// Returns true for states with no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AssetState::Active)
    }
}

impl fmt::Display for AssetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetState::Active => write!(f, "Active"),
            AssetState::Hatched => write!(f, "Hatched"),
            AssetState::Rotted => write!(f, "Rotted"),
        }
    }
}

/// The two balances held by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerKind {
    /// Unlocked, spendable token.
    Base,
    /// Locked voting token (xToken).
    Derivative,
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerKind::Base => write!(f, "base"),
            LedgerKind::Derivative => write!(f, "derivative"),
        }
    }
}

/// Which balance paid for a hatch stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentKind {
    /// Paid with one derivative token.
    Derivative,
    /// Paid with half a base token.
    Base,
}

impl PaymentKind {
    /// Maps the boolean flag used by callers (`use_derivative`) to a payment kind.
    pub fn from_use_derivative(use_derivative: bool) -> Self {
        if use_derivative {
            PaymentKind::Derivative
        } else {
            PaymentKind::Base
        }
    }

    /// The ledger this payment is debited from.
    pub fn ledger(&self) -> LedgerKind {
        match self {
            PaymentKind::Derivative => LedgerKind::Derivative,
            PaymentKind::Base => LedgerKind::Base,
        }
    }
}

/// A perishable egg emitted by the weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Sequential identifier (emission position).
    pub id: AssetId,
    /// Colour of the emission week.
    pub color: ColorTag,
    /// Week in which the egg was emitted.
    pub born_week: u64,
    /// First week at which decay accrues (`born_week + 1`).
    pub rot_start_week: u64,
    /// Linear decay position in [0, 1].
    pub decay_fraction: f64,
    /// Current lifecycle state.
    pub state: AssetState,
}

impl Asset {
    /// Create a fresh, undecayed egg emitted in `week`.
    pub fn new(id: AssetId, week: u64) -> Self {
        Self {
            id,
            color: ColorTag::for_week(week),
            born_week: week,
            rot_start_week: week + 1,
            decay_fraction: 0.0,
            state: AssetState::Active,
        }
    }

    /// Decay position this egg would have at `week`, ignoring its state.
    ///
    /// Zero up to and including the rot-start week, then linear over
    /// `ROT_WINDOW_WEEKS`, clamped to 1.0.
    pub fn decay_at(&self, week: u64) -> f64 {
        if week <= self.rot_start_week {
            return 0.0;
        }
        let elapsed = week - self.rot_start_week;
        if elapsed >= ROT_WINDOW_WEEKS {
            1.0
        } else {
            elapsed as f64 / ROT_WINDOW_WEEKS as f64
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == AssetState::Active
    }

    pub fn is_hatched(&self) -> bool {
        self.state == AssetState::Hatched
    }

    pub fn is_rotted(&self) -> bool {
        self.state == AssetState::Rotted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_cycles_weekly() {
        assert_eq!(ColorTag::for_week(0), ColorTag::Red);
        assert_eq!(ColorTag::for_week(6), ColorTag::Violet);
        assert_eq!(ColorTag::for_week(7), ColorTag::Red);
        assert_eq!(ColorTag::for_week(10), ColorTag::Green);
    }

    #[test]
    fn test_new_asset_fields() {
        let egg = Asset::new(AssetId(3), 4);
        assert_eq!(egg.born_week, 4);
        assert_eq!(egg.rot_start_week, 5);
        assert_eq!(egg.color, ColorTag::Blue);
        assert_eq!(egg.decay_fraction, 0.0);
        assert!(egg.is_active());
    }

    #[test]
    fn test_decay_curve() {
        let egg = Asset::new(AssetId(0), 0);
        assert_eq!(egg.decay_at(0), 0.0);
        assert_eq!(egg.decay_at(1), 0.0);
        assert!((egg.decay_at(4) - 0.5).abs() < 1e-12);
        assert_eq!(egg.decay_at(7), 1.0);
        assert_eq!(egg.decay_at(100), 1.0);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!AssetState::Active.is_terminal());
        assert!(AssetState::Hatched.is_terminal());
        assert!(AssetState::Rotted.is_terminal());
    }

    #[test]
    fn test_payment_kind_from_flag() {
        assert_eq!(PaymentKind::from_use_derivative(true), PaymentKind::Derivative);
        assert_eq!(PaymentKind::from_use_derivative(false), PaymentKind::Base);
        assert_eq!(PaymentKind::Base.ledger(), LedgerKind::Base);
    }
}
