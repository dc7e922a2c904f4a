//! 单张名称表
//!
//! 序号由服务端单调分配且不复用，因此表只增不减；未命中时整表重新拉取。
//! 同一时刻对同一张表最多只有一次刷新在进行。

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cache::SchemaKind;
use crate::core::error::{GraphResult, MetadataError};

#[derive(Debug, Default)]
struct TableState {
    names: Vec<String>,
    /// Completed refresh cycles
    generation: u64,
}

#[derive(Debug)]
pub struct SchemaTable {
    kind: SchemaKind,
    state: RwLock<TableState>,
    /// Held for the whole fetch-and-replace cycle
    gate: Mutex<()>,
    refreshes: AtomicU64,
}

impl SchemaTable {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            state: RwLock::new(TableState::default()),
            gate: Mutex::new(()),
            refreshes: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn get(&self, index: usize) -> Option<String> {
        self.state.read().names.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.state.read().names.clone()
    }

    /// Fetches issued so far, including failed ones
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    /// Name at `index`, refreshing through `fetch` on a miss
    ///
    /// Callers that miss while another caller is refreshing wait for that
    /// refresh and re-check instead of fetching again.
    pub fn resolve<F>(&self, index: usize, fetch: F) -> GraphResult<String>
    where
        F: FnOnce() -> GraphResult<Vec<String>>,
    {
        let observed = {
            let state = self.state.read();
            if let Some(name) = state.names.get(index) {
                return Ok(name.clone());
            }
            state.generation
        };

        {
            let _gate = self.gate.lock();
            if self.state.read().generation == observed {
                self.refresh_locked(fetch)?;
            }
        }

        let state = self.state.read();
        state.names.get(index).cloned().ok_or_else(|| {
            MetadataError::Unresolved {
                kind: self.kind,
                index,
                known: state.names.len(),
            }
            .into()
        })
    }

    /// Unconditional refresh, returns the table length afterwards
    pub fn refresh<F>(&self, fetch: F) -> GraphResult<usize>
    where
        F: FnOnce() -> GraphResult<Vec<String>>,
    {
        let _gate = self.gate.lock();
        self.refresh_locked(fetch)
    }

    /// Caller holds `gate`
    fn refresh_locked<F>(&self, fetch: F) -> GraphResult<usize>
    where
        F: FnOnce() -> GraphResult<Vec<String>>,
    {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        debug!("refreshing {} table", self.kind);
        // 拉取失败不推进 generation，等待者会各自重试
        let names = fetch()?;

        let mut state = self.state.write();
        if names.len() < state.names.len() {
            warn!(
                "ignoring {} refresh with {} names, {} already cached",
                self.kind,
                names.len(),
                state.names.len()
            );
        } else {
            state.names = names;
        }
        state.generation += 1;
        debug!("{} table now holds {} names", self.kind, state.names.len());
        Ok(state.names.len())
    }
}
