//! Desk Server - 酒店前台管理系统服务端
//!
//! # 架构概述
//!
//! 本模块是前台服务端的主入口，提供以下核心功能：
//!
//! - **预订核心** (`booking`): 可用性检查与预订/客房生命周期
//! - **数据库** (`db`): 嵌入式 SQLite 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): 供桌面 UI 层调用的 RESTful 接口
//! - **聊天伴侣** (`concierge`): 远程对话补全客户端
//!
//! # 模块结构
//!
//! ```text
//! desk-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希
//! ├── api/           # HTTP 路由和处理器
//! ├── booking/       # 预订核心 (状态机 + 可用性)
//! ├── concierge/     # 聊天伴侣
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod concierge;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use booking::{Availability, BookingError};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
