//! Users

/// User capability.
pub trait User {
    /// Whether the user has signed in.
    fn is_authenticated(&self) -> bool;
}

/// A shopper attached to a cart session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shopper {
    /// Shopper identifier
    pub id: u64,

    authenticated: bool,
}

impl Shopper {
    /// A signed-in shopper.
    pub fn authenticated(id: u64) -> Self {
        Self {
            id,
            authenticated: true,
        }
    }

    /// A known but signed-out shopper.
    pub fn guest(id: u64) -> Self {
        Self {
            id,
            authenticated: false,
        }
    }
}

impl User for Shopper {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
