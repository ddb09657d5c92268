//! File-backed `TraceStore`: one JSON file per trace under `base_dir`,
//! plus an in-memory index rebuilt by directory scan at construction time
//! so the store survives a restart without a separate index file.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use spendsense_core::{DecisionTrace, SpendSenseError, SpendSenseResult};

use crate::store::TraceStore;
use crate::trace_id;

struct Index {
    /// trace_id -> path on disk
    by_id: HashMap<String, PathBuf>,
    /// customer_id -> (timestamp, trace_id), unsorted; sorted on read
    by_customer: HashMap<String, Vec<(DateTime<Utc>, String)>>,
}

pub struct FileTraceStore {
    base_dir: PathBuf,
    index: RwLock<Index>,
}

impl FileTraceStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> SpendSenseResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;

        let mut by_id = HashMap::new();
        let mut by_customer: HashMap<String, Vec<(DateTime<Utc>, String)>> = HashMap::new();

        for entry in fs::read_dir(&base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let trace = read_trace_file(&path)?;
            by_customer
                .entry(trace.customer_id.clone())
                .or_default()
                .push((trace.timestamp, trace.trace_id.clone()));
            by_id.insert(trace.trace_id.clone(), path);
        }

        Ok(Self {
            base_dir,
            index: RwLock::new(Index { by_id, by_customer }),
        })
    }

    fn path_for(&self, trace_id: &str) -> PathBuf {
        self.base_dir.join(format!("{trace_id}.json"))
    }

    fn write_trace_file(&self, trace: &DecisionTrace) -> SpendSenseResult<PathBuf> {
        let path = self.path_for(&trace.trace_id);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, trace)?;
        writer.flush()?;
        Ok(path)
    }
}

fn read_trace_file(path: &Path) -> SpendSenseResult<DecisionTrace> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let trace = serde_json::from_reader(reader)?;
    Ok(trace)
}

impl TraceStore for FileTraceStore {
    fn write(&self, mut trace: DecisionTrace) -> SpendSenseResult<String> {
        let id = trace_id::allocate(&trace.customer_id, trace.timestamp);
        trace.trace_id = id.clone();

        let path = self.write_trace_file(&trace)?;

        let mut index = self.index.write().expect("trace index lock poisoned");
        index
            .by_customer
            .entry(trace.customer_id.clone())
            .or_default()
            .push((trace.timestamp, id.clone()));
        index.by_id.insert(id.clone(), path);

        Ok(id)
    }

    fn read(&self, trace_id: &str) -> SpendSenseResult<DecisionTrace> {
        let index = self.index.read().expect("trace index lock poisoned");
        let path = index
            .by_id
            .get(trace_id)
            .ok_or_else(|| SpendSenseError::unknown_trace(trace_id))?
            .clone();
        drop(index);
        read_trace_file(&path)
    }

    fn list_by_customer(&self, customer_id: &str) -> SpendSenseResult<Vec<DecisionTrace>> {
        let index = self.index.read().expect("trace index lock poisoned");
        let mut entries = index
            .by_customer
            .get(customer_id)
            .cloned()
            .unwrap_or_default();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        let paths: Vec<PathBuf> = entries
            .iter()
            .filter_map(|(_, id)| index.by_id.get(id).cloned())
            .collect();
        drop(index);

        paths.iter().map(|p| read_trace_file(p)).collect()
    }

    fn record_override(&self, mut override_trace: DecisionTrace) -> SpendSenseResult<String> {
        let original_id = override_trace
            .operator_action
            .as_ref()
            .map(|action| action.trace_id.clone())
            .ok_or_else(|| {
                SpendSenseError::validation("override trace must carry an operator_action")
            })?;

        // Confirm the referenced trace actually exists; never mutate it.
        self.read(&original_id)?;

        override_trace.trace_id = String::new();
        self.write(override_trace)
    }

    fn overrides_for(
        &self,
        trace_id: &str,
    ) -> SpendSenseResult<Vec<spendsense_core::OperatorAction>> {
        let index = self.index.read().expect("trace index lock poisoned");
        let paths: Vec<PathBuf> = index.by_id.values().cloned().collect();
        drop(index);

        let mut actions = Vec::new();
        for path in paths {
            let trace = read_trace_file(&path)?;
            if let Some(action) = trace.operator_action {
                if action.trace_id == trace_id {
                    actions.push(action);
                }
            }
        }
        actions.sort_by(|a, b| a.at.cmp(&b.at));
        Ok(actions)
    }
}
