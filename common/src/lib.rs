//! Certificate form model shared by the backend renderer and the browser front end.
//!
//! - `model`: the certificate request, field addressing, templates and the
//!   document description handed to the renderer.
//! - `validation` and `compose`: pure functions deciding whether a request is
//!   complete and what its certificate says.
//! - `preview`, `render` and `controller`: the stateful form controller and the
//!   token-guarded preview it keeps up to date.

pub mod compose;
pub mod controller;
pub mod error;
pub mod model;
pub mod preview;
pub mod render;
pub mod validation;
