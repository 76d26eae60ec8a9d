// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads.

mod audit;
mod cases;

pub use audit::list_audit_events;
pub use cases::{case_version, get_case};
