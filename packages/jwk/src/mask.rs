//! Key type masks used to ask key finders for particular kinds of keys

use crate::jwk::Jwk;
use bitflags::bitflags;

bitflags! {
    /// Set of key kinds a caller is willing to receive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyTypeMask: u8 {
        /// Asymmetric keys; every asymmetric key carries its public part
        const PUBLIC = 0b0001;
        /// Asymmetric keys carrying private material (`d`)
        const PRIVATE = 0b0010;
        /// Symmetric (`oct`) keys
        const SYMMETRIC = 0b0100;
        /// The `none` pseudo key used by the unsecured algorithm
        const NONE = 0b1000;

        /// Every kind of key usable to check a signature
        const VERIFICATION = Self::PUBLIC.bits() | Self::SYMMETRIC.bits() | Self::NONE.bits();
    }
}

impl KeyTypeMask {
    /// Kinds `jwk` belongs to.
    #[must_use]
    pub fn of(jwk: &Jwk) -> Self {
        match jwk.key_type() {
            Some("oct") => Self::SYMMETRIC,
            Some("none") => Self::NONE,
            _ if jwk.is_private() => Self::PUBLIC | Self::PRIVATE,
            _ => Self::PUBLIC,
        }
    }

    /// Whether `jwk` falls within this mask.
    #[must_use]
    pub fn admits(self, jwk: &Jwk) -> bool {
        self.intersects(Self::of(jwk))
    }
}
