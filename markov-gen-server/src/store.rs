use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use uuid::Uuid;

/// In-memory store of generated texts keyed by an opaque id.
///
/// Holds at most `capacity` entries, the oldest one is evicted first.
/// Only generated strings are kept here, never the chain itself.
#[derive(Debug)]
pub struct OutputStore {
	capacity: usize,
	inner: Mutex<Outputs>,
}

#[derive(Debug, Default)]
struct Outputs {
	texts: HashMap<Uuid, String>,
	order: VecDeque<Uuid>,
}

impl OutputStore {
	pub fn new(capacity: usize) -> Self {
		Self { capacity: capacity.max(1), inner: Mutex::new(Outputs::default()) }
	}

	/// Stores `text` under a fresh id.
	///
	/// # Errors
	/// Returns an error if the lock is poisoned.
	pub fn insert(&self, text: String) -> Result<Uuid, String> {
		let mut outputs = self.inner.lock().map_err(|_| "Output store lock failed".to_owned())?;

		while outputs.order.len() >= self.capacity {
			if let Some(oldest) = outputs.order.pop_front() {
				outputs.texts.remove(&oldest);
			}
		}

		let id = Uuid::new_v4();
		outputs.texts.insert(id, text);
		outputs.order.push_back(id);
		Ok(id)
	}

	/// # Errors
	/// Returns an error if the lock is poisoned.
	pub fn get(&self, id: &Uuid) -> Result<Option<String>, String> {
		let outputs = self.inner.lock().map_err(|_| "Output store lock failed".to_owned())?;
		Ok(outputs.texts.get(id).cloned())
	}

	pub fn len(&self) -> usize {
		self.inner.lock().map(|outputs| outputs.texts.len()).unwrap_or(0)
	}
}
