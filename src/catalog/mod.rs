//! Built-in case catalogue
//!
//! The default registry: every suite the harness verifies against the
//! target service when the caller does not supply a registry file. Purely
//! declarative data; the engine is agnostic to these endpoints.

#![allow(dead_code)]

use serde_json::json;

use crate::models::{CaseSpec, Registry, Suite};

/// Build the default registry
pub fn default_registry() -> Registry {
    Registry::new(vec![
        authentication(),
        metadata(),
        dictionary(),
        sequence(),
        crud(),
        actions(),
        workflow(),
        audit(),
        groups(),
        directories(),
        menus(),
        files(),
        messages(),
        websocket(),
    ])
    .expect("built-in catalogue is valid")
}

fn authentication() -> Suite {
    Suite::new("认证接口")
        .case(
            CaseSpec::post("刷新Token", "/auth/refresh")
                .body(json!({ "refreshToken": "" }))
                .accept(&[200, 401])
                .no_auth(),
        )
        .case(CaseSpec::get("获取会话列表", "/auth/sessions"))
        .case(CaseSpec::post("登出", "/auth/logout"))
}

fn metadata() -> Suite {
    Suite::new("元数据接口")
        .case(CaseSpec::get("获取表信息", "/metadata/tables/sys_user"))
        .case(CaseSpec::get("获取表字段", "/metadata/tables/sys_user/columns"))
        .case(CaseSpec::get("获取表关系", "/metadata/tables/sys_user/refs"))
        .case(CaseSpec::get("获取表动作", "/metadata/tables/sys_user/actions"))
        .case(CaseSpec::post("刷新元数据缓存", "/metadata/refresh"))
        .case(CaseSpec::get("获取元数据版本", "/metadata/version"))
}

fn dictionary() -> Suite {
    Suite::new("字典接口")
        .case(CaseSpec::get("获取字典项(按ID)", "/dicts/1/items"))
        .case(CaseSpec::get("获取字典项(按名称)", "/dicts/name/user_status/items"))
        .case(CaseSpec::get("获取字典默认值", "/dicts/1/default"))
        .case(CaseSpec::post("刷新字典缓存", "/dicts/refresh"))
}

fn sequence() -> Suite {
    Suite::new("序号接口")
        .case(CaseSpec::post("获取下一个序号", "/sequences/ORDER_NO/next"))
        .case(
            CaseSpec::post("批量获取序号", "/sequences/batch")
                .body(json!({ "seqName": "ORDER_NO", "count": 5 })),
        )
        .case(CaseSpec::get("获取当前序号值", "/sequences/ORDER_NO/current"))
}

fn crud() -> Suite {
    Suite::new("通用CRUD接口")
        .case(
            CaseSpec::post("查询列表", "/data/sys_user/query")
                .body(json!({ "page": 1, "pageSize": 10 })),
        )
        .case(CaseSpec::get("获取单条记录", "/data/sys_user/1"))
        .case(
            CaseSpec::post("创建记录", "/data/sys_user")
                .body(json!({ "username": "testuser", "password": "123456" })),
        )
        .case(
            CaseSpec::put("更新记录", "/data/sys_user/1")
                .body(json!({ "username": "updated_user" })),
        )
        .case(CaseSpec::delete("删除记录", "/data/sys_user/999").accept(&[200, 404]))
        .case(
            CaseSpec::post("批量删除", "/data/sys_user/batch-delete")
                .body(json!({ "ids": [997, 998, 999] })),
        )
}

fn actions() -> Suite {
    Suite::new("动作接口")
        .case(CaseSpec::get("获取动作信息", "/actions/1"))
        .case(
            CaseSpec::post("执行动作(按ID)", "/actions/1/execute")
                .body(json!({ "recordId": 1, "params": {} })),
        )
        .case(
            CaseSpec::post("批量执行动作", "/actions/1/batch-execute")
                .body(json!({ "recordIds": [1, 2, 3], "params": {} })),
        )
        .case(
            CaseSpec::post("执行动作(按名称)", "/actions/by-name/sys_user/approve/execute")
                .body(json!({ "recordId": 1 })),
        )
}

fn workflow() -> Suite {
    Suite::new("工作流接口")
        .case(
            CaseSpec::post("创建流程定义", "/workflow/definitions")
                .body(json!({ "name": "测试流程", "code": "TEST_FLOW", "description": "测试" })),
        )
        .case(CaseSpec::get("查询流程定义列表", "/workflow/definitions"))
        .case(CaseSpec::get("获取流程定义详情", "/workflow/definitions/1"))
        .case(
            CaseSpec::put("更新流程定义", "/workflow/definitions/1")
                .body(json!({ "name": "更新后的流程" })),
        )
        .case(CaseSpec::post("发布流程定义", "/workflow/definitions/1/publish"))
        .case(
            CaseSpec::post("创建流程节点", "/workflow/nodes")
                .body(json!({ "definitionId": 1, "name": "开始节点", "nodeType": "start" })),
        )
        .case(CaseSpec::get("查询流程节点", "/workflow/nodes?definitionId=1"))
        .case(
            CaseSpec::put("更新流程节点", "/workflow/nodes/1")
                .body(json!({ "name": "更新后的节点" })),
        )
        .case(CaseSpec::delete("删除流程节点", "/workflow/nodes/999").accept(&[200, 404]))
        .case(CaseSpec::get("查询我的任务", "/workflow/tasks/my"))
        .case(CaseSpec::get("获取任务详情", "/workflow/tasks/1"))
        .case(
            CaseSpec::post("完成任务", "/workflow/tasks/complete")
                .body(json!({ "taskId": 1, "action": "approve", "comment": "同意" })),
        )
}

fn audit() -> Suite {
    Suite::new("审计日志接口")
        .case(CaseSpec::get("查询审计日志", "/audit/logs?page=1&pageSize=10"))
        .case(CaseSpec::get("获取日志详情", "/audit/logs/1"))
        .case(CaseSpec::get("查询用户日志", "/audit/users/1/logs"))
        .case(CaseSpec::get("查询资源日志", "/audit/resources/sys_user/1/logs"))
        .case(CaseSpec::get("获取审计统计", "/audit/statistics"))
        .case(CaseSpec::post("清理过期日志", "/audit/clean").body(json!({ "days": 90 })))
}

fn groups() -> Suite {
    Suite::new("权限组接口")
        .case(
            CaseSpec::post("创建权限组", "/groups")
                .body(json!({ "name": "测试组", "code": "TEST_GROUP", "description": "测试" })),
        )
        .case(CaseSpec::get("查询权限组列表", "/groups"))
        .case(CaseSpec::get("获取权限组详情", "/groups/1"))
        .case(CaseSpec::put("更新权限组", "/groups/1").body(json!({ "name": "更新后的组" })))
        .case(CaseSpec::delete("删除权限组", "/groups/999").accept(&[200, 404]))
        .case(
            CaseSpec::post("分配权限", "/groups/1/permissions")
                .body(json!({ "directoryId": 1, "permission": 3 })),
        )
        .case(CaseSpec::get("获取组权限", "/groups/1/permissions"))
        .case(CaseSpec::post("分配用户到组", "/groups/users/1").body(json!({ "groupIds": [1, 2] })))
        .case(CaseSpec::get("获取用户组", "/groups/users/1"))
        .case(
            CaseSpec::post("检查权限", "/permissions/check")
                .body(json!({ "userId": 1, "directoryId": 1, "requiredPermission": 1 })),
        )
        .case(CaseSpec::get("获取用户权限", "/permissions/user"))
}

fn directories() -> Suite {
    Suite::new("安全目录接口")
        .case(
            CaseSpec::post("创建目录", "/directories")
                .body(json!({ "code": "TEST_DIR", "name": "测试目录", "tableName": "sys_user" })),
        )
        .case(CaseSpec::get("查询目录列表", "/directories"))
        .case(CaseSpec::get("获取目录树", "/directories/tree"))
        .case(CaseSpec::get("获取目录详情", "/directories/1"))
        .case(CaseSpec::put("更新目录", "/directories/1").body(json!({ "name": "更新后的目录" })))
        .case(CaseSpec::delete("删除目录", "/directories/999").accept(&[200, 404]))
}

fn menus() -> Suite {
    Suite::new("菜单接口")
        .case(
            CaseSpec::post("创建菜单", "/menus")
                .body(json!({ "name": "测试菜单", "path": "/test", "icon": "el-icon-test" })),
        )
        .case(CaseSpec::get("查询菜单列表", "/menus"))
        .case(CaseSpec::get("获取菜单树", "/menus/tree"))
        .case(CaseSpec::get("获取用户菜单树", "/menus/user/tree"))
        .case(CaseSpec::get("获取用户路由", "/menus/user/routers"))
        .case(CaseSpec::get("获取菜单详情", "/menus/1"))
        .case(CaseSpec::put("更新菜单", "/menus/1").body(json!({ "name": "更新后的菜单" })))
        .case(CaseSpec::delete("删除菜单", "/menus/999").accept(&[200, 404]))
}

fn files() -> Suite {
    Suite::new("文件接口")
        .case(CaseSpec::get("获取文件信息", "/files/1"))
        .case(
            CaseSpec::post("查询文件列表", "/files/list")
                .body(json!({ "page": 1, "pageSize": 10 })),
        )
        .case(CaseSpec::get("下载文件", "/files/download/1").accept(&[200, 404]))
        .case(CaseSpec::get("预览文件", "/files/preview/1").accept(&[200, 404]))
        .case(CaseSpec::delete("删除文件", "/files/999").accept(&[200, 404]))
}

fn messages() -> Suite {
    Suite::new("消息通知接口")
        .case(CaseSpec::post("发送消息", "/messages/send").body(json!({
            "title": "测试消息",
            "content": "这是一条测试消息",
            "targetType": "user",
            "targetIds": [1]
        })))
        .case(CaseSpec::post("发送模板消息", "/messages/send/template").body(json!({
            "templateCode": "WELCOME",
            "targetType": "user",
            "targetIds": [1],
            "variables": { "userName": "张三" }
        })))
        .case(CaseSpec::post("批量发送消息", "/messages/send/batch").body(json!({
            "userIds": [1, 2, 3],
            "message": { "title": "批量消息", "content": "测试内容" }
        })))
        .case(CaseSpec::post("发送给所有用户", "/messages/send/all").body(json!({
            "title": "全员通知",
            "content": "系统维护通知"
        })))
        .case(CaseSpec::get("获取消息详情", "/messages/1"))
        .case(
            CaseSpec::post("查询消息列表", "/messages/list")
                .body(json!({ "page": 1, "pageSize": 10, "isRead": "N" })),
        )
        .case(CaseSpec::get("获取未读消息数", "/messages/unread/count"))
        .case(CaseSpec::get("获取未读消息列表", "/messages/unread/list?limit=10"))
        .case(CaseSpec::post("标记为已读", "/messages/1/read"))
        .case(CaseSpec::post("标记所有为已读", "/messages/read-all"))
        .case(CaseSpec::post("标记星标", "/messages/1/star").body(json!({ "isStarred": true })))
        .case(CaseSpec::post("归档消息", "/messages/1/archive"))
        .case(CaseSpec::delete("删除消息", "/messages/999").accept(&[200, 404]))
}

fn websocket() -> Suite {
    Suite::new("WebSocket接口")
        .case(CaseSpec::get("获取在线用户列表", "/ws/online/users"))
        .case(CaseSpec::get("检查在线状态", "/ws/online/check"))
        .case(CaseSpec::post("管理员广播消息", "/ws/broadcast").body(json!({
            "type": "SYSTEM_NOTIFY",
            "data": { "title": "系统通知", "content": "测试广播" }
        })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_is_valid() {
        let registry = default_registry();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.suites.len(), 14);
    }

    #[test]
    fn test_suite_order() {
        let registry = default_registry();
        assert_eq!(registry.suites[0].name, "认证接口");
        assert_eq!(registry.suites[1].name, "元数据接口");
        assert_eq!(registry.suites.last().unwrap().name, "WebSocket接口");
    }

    #[test]
    fn test_delete_cases_tolerate_missing_records() {
        let registry = default_registry();
        let crud = registry.suite("通用CRUD接口").unwrap();
        let delete = crud.cases.iter().find(|c| c.name == "删除记录").unwrap();
        assert_eq!(delete.accept, vec![200, 404]);
    }

    #[test]
    fn test_refresh_token_case_is_unauthenticated() {
        let registry = default_registry();
        let auth = registry.suite("认证接口").unwrap();
        let refresh = auth.cases.iter().find(|c| c.name == "刷新Token").unwrap();
        assert!(!refresh.auth);
        assert_eq!(refresh.accept, vec![200, 401]);
    }
}
