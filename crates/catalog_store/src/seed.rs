//! 内置默认导航数据 (built-in catalog seeded on first load)

use crate::types::{Icon, LinkGroup, MainCategory, NavData};

/// The catalog written to storage when no `navData` document exists
pub fn default_nav_data() -> NavData {
    NavData {
        main_categories: default_categories(),
        dev_links: default_link_groups(),
    }
}

fn default_categories() -> Vec<MainCategory> {
    vec![
        MainCategory::new("dev-tools", "开发工具")
            .with_icon(Icon::Code)
            .with_description("开发环境、测试、生产环境相关工具")
            .with_color("bg-blue-500"),
        MainCategory::new("team-collab", "团队协作")
            .with_icon(Icon::Users)
            .with_description("团队沟通、文档协作、项目管理工具")
            .with_color("bg-green-500"),
    ]
}

fn default_link_groups() -> Vec<LinkGroup> {
    vec![
        LinkGroup::new("开发环境", "dev-tools")
            .with_icon(Icon::Code)
            .with_color("bg-blue-100 text-blue-800")
            .with_link("本地开发地址", "http://localhost:3000")
            .with_link("开发服务器", "http://dev.example.com")
            .with_link("API文档", "http://api-docs.example.com")
            .with_link("GraphQL Playground", "http://localhost:4000/graphql")
            .with_link("组件库文档", "http://storybook.example.com"),
        LinkGroup::new("测试环境", "dev-tools")
            .with_icon(Icon::TestTube)
            .with_color("bg-purple-100 text-purple-800")
            .with_link("测试环境地址", "http://test.example.com")
            .with_link("自动化测试报告", "http://test-reports.example.com")
            .with_link("性能测试平台", "http://perf-test.example.com")
            .with_link("UI测试工具", "http://cypress.example.com")
            .with_link("单元测试覆盖率", "http://coverage.example.com"),
        LinkGroup::new("生产环境", "dev-tools")
            .with_icon(Icon::Server)
            .with_color("bg-red-100 text-red-800")
            .with_link("生产环境地址", "https://example.com")
            .with_link("监控平台", "https://monitoring.example.com")
            .with_link("日志平台", "https://logs.example.com")
            .with_link("错误追踪系统", "https://sentry.example.com")
            .with_link("CDN管理", "https://cdn.example.com"),
        LinkGroup::new("工具平台", "dev-tools")
            .with_icon(Icon::Wrench)
            .with_color("bg-yellow-100 text-yellow-800")
            .with_link("代码仓库", "https://github.com/company/project")
            .with_link("CI/CD平台", "https://jenkins.example.com")
            .with_link("项目管理", "https://jira.example.com")
            .with_link("代码审查", "https://review.example.com")
            .with_link("设计系统", "https://design.example.com"),
        LinkGroup::new("数据库服务", "dev-tools")
            .with_icon(Icon::Database)
            .with_color("bg-indigo-100 text-indigo-800")
            .with_link("主数据库", "https://db-main.example.com")
            .with_link("只读副本", "https://db-readonly.example.com")
            .with_link("缓存系统", "https://redis.example.com")
            .with_link("消息队列", "https://mq.example.com")
            .with_link("数据仓库", "https://warehouse.example.com"),
        LinkGroup::new("数据分析", "dev-tools")
            .with_icon(Icon::BarChart)
            .with_color("bg-teal-100 text-teal-800")
            .with_link("数据看板", "https://dashboard.example.com")
            .with_link("BI平台", "https://bi.example.com")
            .with_link("用户行为分析", "https://analytics.example.com")
            .with_link("A/B测试平台", "https://abtest.example.com")
            .with_link("业务指标监控", "https://metrics.example.com"),
        LinkGroup::new("安全合规", "dev-tools")
            .with_icon(Icon::Shield)
            .with_color("bg-pink-100 text-pink-800")
            .with_link("安全扫描", "https://security.example.com")
            .with_link("权限管理", "https://iam.example.com")
            .with_link("审计日志", "https://audit.example.com")
            .with_link("漏洞管理", "https://vuln.example.com")
            .with_link("合规文档", "https://compliance.example.com"),
        LinkGroup::new("版本控制", "dev-tools")
            .with_icon(Icon::GitBranch)
            .with_color("bg-gray-100 text-gray-800")
            .with_link("主分支", "https://github.com/company/project/tree/main")
            .with_link("发布分支", "https://github.com/company/project/releases")
            .with_link("代码提交历史", "https://github.com/company/project/commits")
            .with_link("合并请求", "https://github.com/company/project/pulls")
            .with_link("代码标签", "https://github.com/company/project/tags"),
        LinkGroup::new("文档资源", "team-collab")
            .with_icon(Icon::FileText)
            .with_color("bg-orange-100 text-orange-800")
            .with_link("技术文档", "https://docs.example.com")
            .with_link("API参考", "https://api-docs.example.com")
            .with_link("部署手册", "https://deploy.example.com")
            .with_link("运维手册", "https://ops.example.com")
            .with_link("知识库", "https://wiki.example.com"),
        LinkGroup::new("团队协作", "team-collab")
            .with_icon(Icon::Users)
            .with_color("bg-green-100 text-green-800")
            .with_link("团队通讯", "https://slack.example.com")
            .with_link("视频会议", "https://zoom.example.com")
            .with_link("文档协作", "https://docs.google.com")
            .with_link("设计协作", "https://figma.example.com")
            .with_link("任务看板", "https://trello.example.com"),
        LinkGroup::new("日程管理", "team-collab")
            .with_icon(Icon::Calendar)
            .with_color("bg-cyan-100 text-cyan-800")
            .with_link("项目日历", "https://calendar.example.com")
            .with_link("发布计划", "https://releases.example.com")
            .with_link("会议预约", "https://meetings.example.com")
            .with_link("里程碑", "https://milestones.example.com")
            .with_link("假期安排", "https://pto.example.com"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let nav = default_nav_data();
        assert_eq!(nav.main_categories.len(), 2);
        assert_eq!(nav.dev_links.len(), 11);
        assert!(nav.dev_links.iter().all(|g| g.links.len() == 5));
        assert!(nav.dev_links.iter().all(|g| g.validate().is_ok()));

        let ids: Vec<&str> = nav.main_categories.iter().map(|c| c.id.as_str()).collect();
        assert!(nav
            .dev_links
            .iter()
            .all(|g| ids.contains(&g.main_category.as_str())));
    }
}
