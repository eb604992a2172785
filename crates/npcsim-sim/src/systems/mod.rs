//! Per-tick systems, each a narrow pure(ish) step the engine composes in
//! `engine::SimulationEngine::step`. None of these own simulation state
//! beyond what's passed in — state lives on the driver or the `Agent`.

pub mod blackboard;
pub mod bus;
pub mod execute;
pub mod ghost;
pub mod logic_bridge;
pub mod perception;
pub mod spatial;
