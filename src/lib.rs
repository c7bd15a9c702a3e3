//! DRLSystem - 学生综合测评（rèn luyện）管理后端
//!
//! 基于 Actix Web 构建，负责学生自评、团支书审核、学院审批与学校确认的测评流程，
//! 以及计入测评的活动管理。
//!
//! # 架构
//! - `cache`: 缓存层（Moka）
//! - `config`: 配置管理
//! - `engine`: 评分核心规则（纯函数）
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `notify`: 通知发送
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理与后台任务
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod notify;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
