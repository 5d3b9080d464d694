//! Axis selector.

/// One of the two axes, addressed as `A` or `B` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisSelector {
    /// Axis `A`.
    A,
    /// Axis `B`.
    B,
}

impl AxisSelector {
    /// Both axes in homing order.
    pub const ALL: [AxisSelector; 2] = [AxisSelector::A, AxisSelector::B];

    /// Match a selector token, ignoring ASCII case.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("A") {
            Some(AxisSelector::A)
        } else if token.eq_ignore_ascii_case("B") {
            Some(AxisSelector::B)
        } else {
            None
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            AxisSelector::A => "A",
            AxisSelector::B => "B",
        }
    }
}

impl core::fmt::Display for AxisSelector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
