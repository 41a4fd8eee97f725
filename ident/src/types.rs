//! Small identifier and time value types.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

macro_rules! value_type {
    ($(#[$doc:meta])* $name:ident($ty:ty)) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name($ty);

        impl $name {
            /// Wraps a raw value.
            #[must_use]
            pub const fn new(value: $ty) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn raw(self) -> $ty {
                self.0
            }
        }

        impl From<$ty> for $name {
            fn from(value: $ty) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $ty {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

value_type! {
    /// 16-bit archetype tag stored in occupied slots.
    ArchetypeId(u16)
}

value_type! {
    /// 16-bit component type identifier.
    ComponentId(u16)
}

value_type! {
    /// 8-bit field position within an archetype.
    FieldIndex(u8)
}

value_type! {
    /// Unsigned simulation tick counter.
    Tick(u32)
}

value_type! {
    /// Server wall-clock time in Unix epoch milliseconds.
    ServerTime(i64)
}

impl ComponentId {
    /// Reserved "no component" value.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl Tick {
    /// The first tick of a simulation.
    pub const ZERO: Self = Self(0);

    /// Returns the following tick, wrapping at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns `true` if this tick is zero (often used as "no baseline").
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl ServerTime {
    /// Returns the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Converts a system time, saturating outside the `i64` millisecond range.
    /// Sub-millisecond precision is truncated toward the epoch.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self(i64::try_from(after.as_millis()).unwrap_or(i64::MAX)),
            Err(before) => Self(
                i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
            ),
        }
    }

    /// Converts to a system time, or `None` if the platform cannot represent it.
    #[must_use]
    pub fn to_system_time(self) -> Option<SystemTime> {
        let offset = Duration::from_millis(self.0.unsigned_abs());
        if self.0 >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        }
    }

    /// Returns the epoch milliseconds.
    #[must_use]
    pub const fn epoch_millis(self) -> i64 {
        self.0
    }
}
