//! # 互操作演示程序
//!
//! 分别在单个容器内演示多实现绑定，以及在主副容器之间连接和整合依赖。

mod services;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use di_abstractions::{ContainerAdapter, ContainerAdapterExt, Provider};
use di_impl::{DiAdapterFactory, EngineKind, Side};
use infrastructure_common::{DependencyError, Lifetime};
use infrastructure_composition::{initialize_logging, InteropBuilder, InteropSettings, LoggingConfig};
use services::{
    AggregationService, Dao, InheritanceService, Logger, MockDao, ModelService, MyService,
    Repository, Service,
};
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "interop-demo")]
#[command(about = "依赖注入容器互操作演示")]
struct Args {
    /// 配置文件路径，提供后只演示配置中的主副容器组合
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 输出 JSON 格式日志
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::development();
    logging.level = args
        .log_level
        .parse()
        .with_context(|| format!("无效的日志级别: {}", args.log_level))?;
    logging.json_format = args.json;
    initialize_logging(&logging)?;

    for kind in [EngineKind::DependencyInjector, EngineKind::Injector] {
        info!("========== 单容器演示: {} ==========", kind);
        multiple_implementations(kind)?;
    }

    let pairs = match &args.config {
        Some(path) => {
            let settings = InteropSettings::from_file(path)?;
            vec![(settings.primary_kind()?, settings.secondary_kind()?)]
        }
        None => vec![
            (EngineKind::Injector, EngineKind::DependencyInjector),
            (EngineKind::DependencyInjector, EngineKind::Injector),
        ],
    };

    for (primary, secondary) in pairs {
        info!("========== 互操作桥接演示: {} / {} ==========", primary, secondary);
        interop_bridge(primary, secondary)?;
    }

    Ok(())
}

/// 创建一个从同一容器解析依赖的 MyService 提供者
fn my_service_provider(
    adapter: &Arc<dyn ContainerAdapter>,
    dao_qualifier: Option<&'static str>,
) -> Provider<dyn Service> {
    let weak = Arc::downgrade(adapter);
    Provider::<dyn Service>::try_new(move || {
        let adapter = weak.upgrade().ok_or(DependencyError::AdapterUnavailable {
            engine: "demo".to_string(),
        })?;
        let service: Arc<dyn Service> = Arc::new(MyService {
            dao: adapter.resolve::<dyn Repository>(dao_qualifier)?,
            logger: adapter.resolve::<Logger>(None)?,
            model_service: adapter.resolve::<ModelService>(None)?,
        });
        info!("[{}] 创建 MyService {:p}", adapter.engine_name(), Arc::as_ptr(&service));
        Ok(service)
    })
}

fn multiple_implementations(kind: EngineKind) -> Result<()> {
    let adapter: Arc<dyn ContainerAdapter> = Arc::new(DiAdapterFactory::create_kind(kind));

    adapter.bind::<dyn Repository>(Provider::<dyn Repository>::new(|| Arc::new(Dao)), Lifetime::Singleton, None);
    adapter.bind::<dyn Repository>(
        Provider::<dyn Repository>::new(|| Arc::new(MockDao)),
        Lifetime::Singleton,
        Some("MockDAO"),
    );
    adapter.bind_type::<Logger>(Lifetime::Singleton, None);
    adapter.bind_type::<ModelService>(Lifetime::Transient, None);

    // 不带限定名的实现使用真实 DAO，带限定名的实现使用模拟 DAO
    adapter.bind(my_service_provider(&adapter, None), Lifetime::Transient, None);
    adapter.bind(
        my_service_provider(&adapter, Some("MockDAO")),
        Lifetime::Singleton,
        Some("MyServiceMock"),
    );

    let real_1 = adapter.resolve::<dyn Service>(None)?;
    let real_2 = adapter.resolve::<dyn Service>(None)?;
    info!(
        "[{}] MyService (DAO) 实例1 {:p}, 实例2 {:p}",
        kind,
        Arc::as_ptr(&real_1),
        Arc::as_ptr(&real_2)
    );
    ensure!(!Arc::ptr_eq(&real_1, &real_2), "瞬时服务应返回不同实例");

    let mock_1 = adapter.resolve::<dyn Service>(Some("MyServiceMock"))?;
    let mock_2 = adapter.resolve::<dyn Service>(Some("MyServiceMock"))?;
    info!(
        "[{}] MyService (MockDAO) 实例1 {:p}, 实例2 {:p}",
        kind,
        Arc::as_ptr(&mock_1),
        Arc::as_ptr(&mock_2)
    );
    ensure!(Arc::ptr_eq(&mock_1, &mock_2), "单例服务应返回同一实例");

    info!("[{}] 测试 AggregationService", kind);
    AggregationService::new(
        adapter.resolve::<dyn Service>(None)?,
        adapter.resolve::<dyn Service>(None)?,
    )
    .aggregate();

    info!("[{}] 测试 AggregationService (MockDAO)", kind);
    AggregationService::new(
        adapter.resolve::<dyn Service>(Some("MyServiceMock"))?,
        adapter.resolve::<dyn Service>(Some("MyServiceMock"))?,
    )
    .aggregate();

    info!("[{}] 测试不经过容器的 InheritanceService", kind);
    InheritanceService.serve();

    ensure!(real_1.repository().connect().starts_with("DAO"), "应注入真实 DAO");
    ensure!(mock_1.repository().connect().starts_with("MockDAO"), "应注入模拟 DAO");

    info!("[{}] 全部检查通过", kind);
    Ok(())
}

fn interop_bridge(primary: EngineKind, secondary: EngineKind) -> Result<()> {
    let bridge = InteropBuilder::new()
        .with_engines(primary.as_str(), secondary.as_str())
        .build()?;

    bridge
        .primary()
        .bind::<dyn Repository>(Provider::<dyn Repository>::new(|| Arc::new(Dao)), Lifetime::Singleton, None);
    bridge
        .primary()
        .bind_type::<ModelService>(Lifetime::Transient, None);

    // 单例在两个容器之间共享，瞬时组件在每个容器中都重新创建
    bridge.connect::<dyn Repository>(Side::Primary, None, Lifetime::Singleton)?;
    bridge.connect::<ModelService>(Side::Primary, None, Lifetime::Transient)?;

    bridge.integrate::<dyn Repository, dyn Repository>(None)?;
    bridge.integrate::<ModelService, ModelService>(None)?;

    let dao_1 = bridge.get::<dyn Repository>(None)?;
    let dao_2 = bridge.get::<dyn Repository>(None)?;
    info!(
        "[{} & {}] DAO 实例1 {:p}, 实例2 {:p}",
        primary,
        secondary,
        Arc::as_ptr(&dao_1),
        Arc::as_ptr(&dao_2)
    );
    ensure!(Arc::ptr_eq(&dao_1, &dao_2), "共享的 DAO 应为同一实例");

    let model_1 = bridge.get::<ModelService>(None)?;
    let model_2 = bridge.get::<ModelService>(None)?;
    info!(
        "[{} & {}] ModelService 实例1 {:p}, 实例2 {:p}",
        primary,
        secondary,
        Arc::as_ptr(&model_1),
        Arc::as_ptr(&model_2)
    );
    let first_session = model_1.generate_session();
    let second_session = model_2.generate_session();
    ensure!(first_session != second_session, "每次生成的会话ID应不同");

    let fresh_1 = bridge.secondary().resolve::<ModelService>(None)?;
    let fresh_2 = bridge.secondary().resolve::<ModelService>(None)?;
    ensure!(
        !Arc::ptr_eq(&fresh_1, &fresh_2) && fresh_1.session_id().is_none(),
        "副容器中的 ModelService 应为新实例"
    );

    info!("[{} & {}] 注册表条目数: {}", primary, secondary, bridge.registry().len());
    Ok(())
}
