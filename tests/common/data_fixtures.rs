//! 测试数据生成模块
//!
//! 以 JSON 描述紧凑回复，再转换为 `Reply`

use redisgraph::core::Reply;
use serde_json::{json, Value as Json};

pub fn reply(json: Json) -> Reply {
    Reply::try_from(json).expect("fixture is a valid reply")
}

/// `CALL db.labels()` 一类过程的回复：单列字符串
pub fn procedure_reply(names: &[String]) -> Reply {
    let rows: Vec<Json> = names.iter().map(|n| json!([[2, n]])).collect();
    reply(json!([[[1, "name"]], rows, ["Query internal execution time: 0.05 milliseconds"]]))
}

/// 节点片段 `[8, [id, labels, properties]]`
pub fn node(id: i64, labels: &[i64], properties: Json) -> Json {
    json!([8, [id, labels, properties]])
}

/// 边片段 `[7, [id, type, src, dst, properties]]`
pub fn edge(id: i64, relationship_type: i64, src: i64, dst: i64, properties: Json) -> Json {
    json!([7, [id, relationship_type, src, dst, properties]])
}

/// 路径片段，节点和边均以数组片段包装
pub fn path(nodes: Vec<Json>, edges: Vec<Json>) -> Json {
    json!([9, [[6, nodes], [6, edges]]])
}

/// 完整的查询回复
pub fn query_reply(columns: &[&str], rows: Vec<Json>, stats: &[&str]) -> Json {
    let header: Vec<Json> = columns.iter().map(|c| json!([1, c])).collect();
    json!([header, rows, stats])
}
