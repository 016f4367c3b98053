//! Type-keyed ability registry

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// A skill an actor can hold, such as driving a browser or calling an API.
///
/// Abilities are registered and resolved by their concrete type; an actor
/// holds at most one instance of each.
pub trait Ability: Any + Send + Sync {}

/// Readable name of any type with module paths stripped.
///
/// `my_crate::web::BrowseTheWeb<my_crate::driver::Chrome>` renders as
/// `BrowseTheWeb<Chrome>`.
pub fn type_label<T: ?Sized>() -> String {
    short_type_name(type_name::<T>())
}

/// Name used for an ability in registry errors.
pub fn ability_name<A: ?Sized>() -> String {
    type_label::<A>()
}

fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '&' | '[' | ']' | ';' => {
                out.push_str(last_segment(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(last_segment(&segment));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

struct Registered {
    name: String,
    ability: Box<dyn Any + Send + Sync>,
}

/// One boxed ability per concrete type.
#[derive(Default)]
pub struct AbilityRegistry {
    entries: HashMap<TypeId, Registered>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains<A: Ability>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<A>())
    }

    /// Inserts `ability` unless one of the same type is already present.
    ///
    /// Returns the rejected ability on conflict; the existing one is kept.
    pub fn insert<A: Ability>(&mut self, ability: A) -> Result<(), A> {
        if self.contains::<A>() {
            return Err(ability);
        }
        self.entries.insert(
            TypeId::of::<A>(),
            Registered {
                name: ability_name::<A>(),
                ability: Box::new(ability),
            },
        );
        Ok(())
    }

    pub fn get<A: Ability>(&self) -> Option<&A> {
        self.entries
            .get(&TypeId::of::<A>())
            .and_then(|entry| entry.ability.downcast_ref::<A>())
    }

    pub fn get_mut<A: Ability>(&mut self) -> Option<&mut A> {
        self.entries
            .get_mut(&TypeId::of::<A>())
            .and_then(|entry| entry.ability.downcast_mut::<A>())
    }

    pub fn remove<A: Ability>(&mut self) -> Option<A> {
        let entry = self.entries.remove(&TypeId::of::<A>())?;
        entry.ability.downcast::<A>().ok().map(|boxed| *boxed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered abilities, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .map(|entry| entry.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityRegistry")
            .field("abilities", &self.names())
            .finish()
    }
}
