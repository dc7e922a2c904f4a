//! 自定义断言辅助模块

use redisgraph::core::{GraphError, GraphResult, LookupError};

/// 断言结果成功，返回内部值
pub fn assert_ok<T>(result: GraphResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("操作应该成功, 实际错误: {}", err),
    }
}

/// 断言失败且错误消息包含指定片段
pub fn assert_err_with<T: std::fmt::Debug>(result: GraphResult<T>, expected_msg: &str) -> GraphError {
    let err = result.expect_err("操作应该失败");
    assert!(
        err.to_string().contains(expected_msg),
        "错误消息应包含 '{}', 实际是 '{}'",
        expected_msg,
        err
    );
    err
}

/// 断言为调用方可避免的查找错误
pub fn assert_lookup<T: std::fmt::Debug>(result: GraphResult<T>, expected: LookupError) {
    match result.expect_err("操作应该失败") {
        GraphError::Lookup(actual) => assert_eq!(actual, expected),
        other => panic!("期望查找错误 {:?}, 实际是 {:?}", expected, other),
    }
}
