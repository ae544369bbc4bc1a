// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The injected diagnostic callback.

use std::fmt::Debug;
use std::sync::Arc;

/**
Receives every non-fatal degradation and every fatal condition a layer runs into.

Fatal conditions are additionally returned as [`crate::error::Error`].  Each report is also
logged with `logwise`, so a no-op callback still leaves a trace.

```
use data_layers::diagnostics::Diagnostics;
use std::sync::{Arc, Mutex};

let seen = Arc::new(Mutex::new(Vec::new()));
let move_seen = seen.clone();
let diagnostics = Diagnostics::new(move |message| move_seen.lock().unwrap().push(message.to_string()));
diagnostics.report("half float fallback");
assert_eq!(seen.lock().unwrap().len(), 1);
```
*/
#[derive(Clone)]
pub struct Diagnostics {
    callback: Arc<dyn Fn(&str) + Send + Sync>,
}

impl Diagnostics {
    pub fn new<F: Fn(&str) + Send + Sync + 'static>(callback: F) -> Self {
        Diagnostics {
            callback: Arc::new(callback),
        }
    }

    /// A callback that only logs.
    pub fn log_only() -> Self {
        Diagnostics::new(|_| {})
    }

    pub fn report(&self, message: &str) {
        logwise::warn_sync!("{message}", message = message.to_string());
        (self.callback)(message);
    }
}

impl Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}
