// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes. Each public function runs inside the caller's transaction.

mod audit;
mod cases;

pub use audit::persist_audit_event;
pub use cases::{put_case, write_case_if_version};
