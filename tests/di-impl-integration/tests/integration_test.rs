//! 互操作桥接端到端测试
//!
//! 覆盖单一容器下的多实现绑定，以及主副容器之间的连接与整合。

use anyhow::Result;
use di_abstractions::{ContainerAdapter, ContainerAdapterExt, Provider};
use di_impl::{DiAdapterFactory, EngineKind, InteropBridge, Side};
use infrastructure_common::{DependencyError, Lifetime};
use infrastructure_composition::InteropBuilder;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 抽象组件
trait Counter: Send + Sync {
    fn increment(&self) -> usize;
    fn value(&self) -> usize;
}

/// 带内部状态的具体实现
#[derive(Debug, Default)]
struct ConcreteA {
    count: AtomicUsize,
}

impl Counter for ConcreteA {
    fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn value(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

fn concrete_a() -> Provider<dyn Counter> {
    Provider::<dyn Counter>::new(|| Arc::new(ConcreteA::default()))
}

trait Repository: Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Debug, Default)]
struct Dao;

impl Repository for Dao {
    fn name(&self) -> &'static str {
        "dao"
    }
}

#[derive(Debug, Default)]
struct MockDao;

impl Repository for MockDao {
    fn name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Debug, Default)]
struct Logger {
    lines: Mutex<Vec<String>>,
}

impl Logger {
    fn log(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }
}

#[derive(Debug, Default)]
struct ModelService {
    sessions: AtomicUsize,
}

trait Service: Send + Sync {
    fn serve(&self) -> String;
    fn repository(&self) -> &'static str;
}

struct MyService {
    dao: Arc<dyn Repository>,
    logger: Arc<Logger>,
    model: Arc<ModelService>,
}

impl Service for MyService {
    fn serve(&self) -> String {
        let session = self.model.sessions.fetch_add(1, Ordering::SeqCst);
        self.logger.log(format!("serving with {}", self.dao.name()));
        format!("{}#{}", self.dao.name(), session)
    }

    fn repository(&self) -> &'static str {
        self.dao.name()
    }
}

fn bridges() -> Vec<InteropBridge> {
    [
        (EngineKind::Injector, EngineKind::DependencyInjector),
        (EngineKind::DependencyInjector, EngineKind::Injector),
    ]
    .into_iter()
    .map(|(primary, secondary)| {
        InteropBuilder::new()
            .with_engines(primary.as_str(), secondary.as_str())
            .build()
            .unwrap()
    })
    .collect()
}

#[test]
fn test_singleton_concrete_shares_identity_and_state() -> Result<()> {
    for bridge in bridges() {
        bridge.bind(concrete_a(), Lifetime::Singleton, None)?;

        let first = bridge.get::<dyn Counter>(None)?;
        let second = bridge.get::<dyn Counter>(None)?;
        assert!(Arc::ptr_eq(&first, &second));

        first.increment();
        assert_eq!(second.value(), 1);
    }
    Ok(())
}

#[test]
fn test_transient_concrete_yields_distinct_objects() -> Result<()> {
    for bridge in bridges() {
        bridge.bind(concrete_a(), Lifetime::Transient, None)?;

        let first = bridge.get::<dyn Counter>(None)?;
        let second = bridge.get::<dyn Counter>(None)?;
        assert!(!Arc::ptr_eq(&first, &second));

        first.increment();
        assert_eq!(second.value(), 0);
    }
    Ok(())
}

/// 在单个容器中绑定同一抽象的两个实现，一个不带限定名，一个带限定名
fn bind_services(adapter: Arc<dyn ContainerAdapter>) {
    adapter.bind::<dyn Repository>(Provider::<dyn Repository>::new(|| Arc::new(Dao)), Lifetime::Singleton, None);
    adapter.bind::<dyn Repository>(
        Provider::<dyn Repository>::new(|| Arc::new(MockDao)),
        Lifetime::Singleton,
        Some("mock"),
    );
    adapter.bind_type::<Logger>(Lifetime::Singleton, None);
    adapter.bind_type::<ModelService>(Lifetime::Transient, None);

    let make_service = |dao_qualifier: Option<&'static str>| {
        let weak = Arc::downgrade(&adapter);
        Provider::<dyn Service>::try_new(move || {
            let adapter = weak
                .upgrade()
                .ok_or(DependencyError::AdapterUnavailable {
                    engine: "test".to_string(),
                })?;
            let service: Arc<dyn Service> = Arc::new(MyService {
                dao: adapter.resolve::<dyn Repository>(dao_qualifier)?,
                logger: adapter.resolve::<Logger>(None)?,
                model: adapter.resolve::<ModelService>(None)?,
            });
            Ok(service)
        })
    };

    adapter.bind(make_service(None), Lifetime::Transient, None);
    adapter.bind(make_service(Some("mock")), Lifetime::Singleton, Some("MyServiceMock"));
}

#[test]
fn test_multiple_implementations_in_one_container() -> Result<()> {
    for kind in EngineKind::ALL {
        let adapter: Arc<dyn ContainerAdapter> = Arc::new(DiAdapterFactory::create_kind(kind));
        bind_services(Arc::clone(&adapter));

        let real_1 = adapter.resolve::<dyn Service>(None)?;
        let real_2 = adapter.resolve::<dyn Service>(None)?;
        assert!(!Arc::ptr_eq(&real_1, &real_2));
        assert_eq!(real_1.repository(), "dao");

        let mock_1 = adapter.resolve::<dyn Service>(Some("MyServiceMock"))?;
        let mock_2 = adapter.resolve::<dyn Service>(Some("MyServiceMock"))?;
        assert!(Arc::ptr_eq(&mock_1, &mock_2));
        assert_eq!(mock_1.repository(), "mock");

        // 聚合两个服务
        let outputs: Vec<String> = [real_1, real_2].iter().map(|s| s.serve()).collect();
        assert_eq!(outputs, vec!["dao#0", "dao#0"]);
        assert_eq!(mock_1.serve(), "mock#0");
        assert_eq!(mock_2.serve(), "mock#1");

        let logger = adapter.resolve::<Logger>(None)?;
        assert_eq!(logger.lines.lock().len(), 4);
    }
    Ok(())
}

#[test]
fn test_connect_and_integrate_across_containers() -> Result<()> {
    for bridge in bridges() {
        bridge
            .primary()
            .bind::<dyn Repository>(Provider::<dyn Repository>::new(|| Arc::new(Dao)), Lifetime::Singleton, None);
        bridge
            .primary()
            .bind_type::<ModelService>(Lifetime::Transient, None);

        let dao = bridge.primary().resolve::<dyn Repository>(None)?;
        let connected_dao = bridge.connect::<dyn Repository>(Side::Primary, None, Lifetime::Singleton)?;
        bridge.connect::<ModelService>(Side::Primary, None, Lifetime::Transient)?;
        assert!(Arc::ptr_eq(&dao, &connected_dao));

        let (dao_primary, dao_secondary) =
            bridge.integrate::<dyn Repository, dyn Repository>(None)?;
        assert!(Arc::ptr_eq(&dao_primary, &dao));
        assert!(Arc::ptr_eq(&dao_secondary, &dao));

        let (model_primary, model_secondary) =
            bridge.integrate::<ModelService, ModelService>(None)?;
        assert!(Arc::ptr_eq(&model_primary, &model_secondary));

        let dao_1 = bridge.get::<dyn Repository>(None)?;
        let dao_2 = bridge.get::<dyn Repository>(None)?;
        assert!(Arc::ptr_eq(&dao_1, &dao_2));
        assert!(Arc::ptr_eq(&bridge.secondary().resolve::<dyn Repository>(None)?, &dao));

        // 整合后的 ModelService 由注册表提供
        let model_1 = bridge.get::<ModelService>(None)?;
        let model_2 = bridge.get::<ModelService>(None)?;
        assert!(Arc::ptr_eq(&model_1, &model_2));
        assert!(Arc::ptr_eq(&model_1, &model_primary));

        // 副容器中的 ModelService 仍然是瞬时的
        let fresh_1 = bridge.secondary().resolve::<ModelService>(None)?;
        let fresh_2 = bridge.secondary().resolve::<ModelService>(None)?;
        assert!(!Arc::ptr_eq(&fresh_1, &fresh_2));
    }
    Ok(())
}
