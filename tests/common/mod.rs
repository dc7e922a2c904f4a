//! 集成测试共享工具模块
//!
//! 提供脚本化的传输层替身，按命令记录调用次数

#![allow(dead_code)]

pub mod assertions;
pub mod data_fixtures;

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use redisgraph::api::{Graph, Transport, GRAPH_QUERY};
use redisgraph::core::{Reply, TransportError};

/// 一次 `execute` 调用
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub command: String,
    pub args: Vec<String>,
}

/// 传输层替身
///
/// - `CALL db.*()` 过程按当前登记的名称表应答，可在测试中途修改
/// - 其余命令依次弹出预先排队的回复，队列为空时返回连接关闭
pub struct ScriptedTransport {
    procedures: Mutex<HashMap<String, Vec<String>>>,
    replies: Mutex<VecDeque<Result<Reply, String>>>,
    calls: Mutex<Vec<Call>>,
    procedure_delay: Duration,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Self::with_delay(Duration::ZERO)
    }

    /// 过程应答前先休眠，拉大并发刷新的竞争窗口
    pub fn with_delay(procedure_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            procedures: Mutex::new(HashMap::new()),
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            procedure_delay,
        })
    }

    pub fn set_labels(&self, names: &[&str]) {
        self.set_procedure("db.labels", names);
    }

    pub fn set_relationship_types(&self, names: &[&str]) {
        self.set_procedure("db.relationshipTypes", names);
    }

    pub fn set_property_keys(&self, names: &[&str]) {
        self.set_procedure("db.propertyKeys", names);
    }

    fn set_procedure(&self, procedure: &str, names: &[&str]) {
        self.procedures.lock().insert(
            format!("CALL {}()", procedure),
            names.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn push_reply(&self, reply: Reply) {
        self.replies.lock().push_back(Ok(reply));
    }

    pub fn push_json(&self, json: serde_json::Value) {
        self.push_reply(data_fixtures::reply(json));
    }

    /// 下一次非过程调用以传输错误失败
    pub fn push_failure(&self, message: &str) {
        self.replies.lock().push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// 发往指定过程的请求数
    pub fn procedure_calls(&self, procedure: &str) -> usize {
        let query = format!("CALL {}()", procedure);
        self.calls
            .lock()
            .iter()
            .filter(|c| c.command == GRAPH_QUERY && c.args.get(1) == Some(&query))
            .count()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, command: &str, args: &[String]) -> Result<Reply, TransportError> {
        self.calls.lock().push(Call {
            command: command.to_string(),
            args: args.to_vec(),
        });

        if command == GRAPH_QUERY {
            let names = args
                .get(1)
                .and_then(|query| self.procedures.lock().get(query).cloned());
            if let Some(names) = names {
                if !self.procedure_delay.is_zero() {
                    thread::sleep(self.procedure_delay);
                }
                return Ok(data_fixtures::procedure_reply(&names));
            }
        }

        match self.replies.lock().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Closed),
        }
    }
}

/// 以 `social` 图和脚本化传输层构造客户端
pub fn test_graph() -> (Arc<ScriptedTransport>, Graph) {
    let transport = ScriptedTransport::new();
    let graph = Graph::new("social", transport.clone());
    (transport, graph)
}
