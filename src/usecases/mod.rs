//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates the domain engine with port interfaces.
//!
//! Use cases:
//! - `TicketBuilder`: Price a selection and hand it to the cart

pub mod ticket_builder;
