use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::auth::JwtService;
use crate::concierge::{ChatClient, ChatSession};
use crate::core::Config;
use crate::db::{DbService, repository::user};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | chat_client | Arc<ChatClient> | 聊天伴侣 HTTP 客户端 |
/// | chat_session | Arc<Mutex<ChatSession>> | 进程级会话记录 (显式作用域，非全局) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 聊天伴侣客户端
    pub chat_client: Arc<ChatClient>,
    /// 聊天伴侣会话记录 (随进程存续)
    pub chat_session: Arc<Mutex<ChatSession>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/hotel.db) + 迁移
    /// 3. 默认管理员账号 (首次启动时)
    /// 4. JWT 服务与聊天伴侣
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("hotel.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let pool = db_service.pool;

        // 2. Seed the default admin on a fresh database
        user::ensure_default_admin(&pool).await?;

        // 3. Services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let chat_client = Arc::new(
            ChatClient::new(config.chat.clone())
                .map_err(|e| AppError::internal(format!("Chat client init failed: {e}")))?,
        );
        let chat_session = Arc::new(Mutex::new(ChatSession::new(&config.chat.system_prompt)));

        Ok(Self {
            config: config.clone(),
            pool,
            jwt_service,
            chat_client,
            chat_session,
        })
    }
}
