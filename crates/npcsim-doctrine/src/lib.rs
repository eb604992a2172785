//! Decision doctrine: a pure, priority-ordered rule table mapping an
//! agent's current state plus its nearby perceived world to the single
//! [`npcsim_core::enums::Action`] it takes this tick. Doctrine-as-data
//! rather than a behavior tree or state machine: each row is a (guard,
//! outcome) pair evaluated in order, first match wins.

pub mod doctrine;

#[cfg(test)]
mod tests;
