//! 演示用服务

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 数据访问抽象
pub trait Repository: Send + Sync {
    fn connect(&self) -> String;
}

/// 真实数据访问对象
#[derive(Debug, Default)]
pub struct Dao;

impl Repository for Dao {
    fn connect(&self) -> String {
        "DAO: 已连接数据库".to_string()
    }
}

/// 模拟数据访问对象
#[derive(Debug, Default)]
pub struct MockDao;

impl Repository for MockDao {
    fn connect(&self) -> String {
        "MockDAO: 已连接模拟数据库".to_string()
    }
}

/// 日志记录器
#[derive(Debug, Default)]
pub struct Logger;

impl Logger {
    pub fn log(&self, message: &str) {
        info!("Logger: {}", message);
    }
}

/// 会话服务，每次调用生成新的会话ID
#[derive(Debug, Default)]
pub struct ModelService {
    session_id: Mutex<Option<Uuid>>,
}

impl ModelService {
    pub fn generate_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        *self.session_id.lock() = Some(id);
        info!("ModelService 生成新的会话ID: {}", id);
        id
    }

    pub fn session_id(&self) -> Option<Uuid> {
        *self.session_id.lock()
    }
}

/// 服务抽象
pub trait Service: Send + Sync {
    fn serve(&self);
    fn repository(&self) -> &dyn Repository;
}

/// 依赖数据访问、日志和会话服务的具体服务
pub struct MyService {
    pub dao: Arc<dyn Repository>,
    pub logger: Arc<Logger>,
    pub model_service: Arc<ModelService>,
}

impl Service for MyService {
    fn serve(&self) {
        self.logger.log("MyService 使用 DAO 和 ModelService 提供服务");
        info!("{}", self.dao.connect());
        self.model_service.generate_session();
        info!(
            "MyService {:p}: DAO {:p}, Logger {:p}, ModelService {:p}",
            self,
            Arc::as_ptr(&self.dao),
            Arc::as_ptr(&self.logger),
            Arc::as_ptr(&self.model_service)
        );
    }

    fn repository(&self) -> &dyn Repository {
        self.dao.as_ref()
    }
}

/// 聚合两个服务
pub struct AggregationService {
    first: Arc<dyn Service>,
    second: Arc<dyn Service>,
}

impl AggregationService {
    pub fn new(first: Arc<dyn Service>, second: Arc<dyn Service>) -> Self {
        Self { first, second }
    }

    pub fn aggregate(&self) {
        info!("AggregationService: 聚合两个服务的结果");
        self.first.serve();
        self.second.serve();
    }
}

/// 不经过容器，直接实现服务抽象
#[derive(Debug, Default)]
pub struct InheritanceService;

impl Service for InheritanceService {
    fn serve(&self) {
        info!("InheritanceService {:p} 正在提供服务", self);
    }

    fn repository(&self) -> &dyn Repository {
        &Dao
    }
}
