/// Anything with a store-assigned identity.
///
/// An entity is "new" until the store hands it an identifier on first save.
pub trait Entity {
    type Id: Copy;

    /// The assigned identity, if any.
    fn id(&self) -> Option<Self::Id>;

    /// True while no identity has been assigned.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

/// An entity whose primary attribute is a name (pets, pet types, specialties).
pub trait Named {
    fn name(&self) -> &str;
}

/// Shared accessors for people (owners and vets).
pub trait Person {
    fn first_name(&self) -> &str;

    fn last_name(&self) -> &str;

    /// "First Last".
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}
