// ==========================================
// 奖助学金管理看板 - 命令行入口
// ==========================================
// 子命令:
// - enrich:  加载组织架构 + 花名册，充实后导出 CSV
// - resolve: 查询本地代码对应的部门与主管
// - config:  查看 / 修改 config_kv 配置
// ==========================================

use anyhow::{anyhow, Context, Result};
use bolsas_dashboard::config::{config_keys, ConfigManager, EnrichmentConfigReader};
use bolsas_dashboard::db::get_default_db_path;
use bolsas_dashboard::engine::{OrgChartIndex, OrgResolver};
use bolsas_dashboard::export::{write_enriched_csv, write_enriched_csv_file};
use bolsas_dashboard::importer::{
    DataSource, DatasetLoader, RosterImporter, RosterImporterImpl, ORG_CHART_SOURCE_KEY,
    ROSTER_SOURCE_KEY,
};
use bolsas_dashboard::{logging, DqLevel, APP_NAME, VERSION};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[clap(name = "bolsas-dashboard", version)]
#[clap(about = "组织架构代码解析与奖助学金花名册充实")]
struct Args {
    /// 配置库路径（默认: BOLSAS_DASHBOARD_DB_PATH 或用户数据目录）
    #[clap(long, global = true, env = "BOLSAS_DASHBOARD_DB_PATH")]
    config_db: Option<String>,

    /// 以 JSON 格式输出日志
    #[clap(long, global = true)]
    json_logs: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 充实花名册并导出 CSV
    Enrich {
        /// 组织架构文件（默认取配置）
        #[clap(long, value_name = "PATH")]
        org_chart: Option<PathBuf>,

        /// 花名册文件（默认取配置）
        #[clap(long, value_name = "PATH")]
        roster: Option<PathBuf>,

        /// 输出 CSV（缺省输出到 stdout）
        #[clap(long, short, value_name = "PATH")]
        output: Option<PathBuf>,

        /// DQ 报告输出（JSON）
        #[clap(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },

    /// 解析本地代码
    Resolve {
        /// 组织架构文件
        #[clap(long, value_name = "PATH")]
        org_chart: PathBuf,

        /// 待解析的本地代码
        #[clap(required = true)]
        codes: Vec<String>,
    },

    /// 配置管理
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 显示全部配置（JSON）
    Show,
    /// 设置配置项
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }
    info!(version = VERSION, "{}", APP_NAME);

    let db_path = args.config_db.clone().unwrap_or_else(get_default_db_path);

    match args.command {
        Command::Enrich {
            org_chart,
            roster,
            output,
            report,
        } => run_enrich(&db_path, org_chart, roster, output, report).await,
        Command::Resolve { org_chart, codes } => run_resolve(&org_chart, &codes),
        Command::Config { action } => run_config(&db_path, action),
    }
}

fn open_config(db_path: &str) -> Result<ConfigManager> {
    info!(db_path = %db_path, "使用配置库");
    ConfigManager::new(db_path).map_err(|e| anyhow!("无法打开配置库 {}: {}", db_path, e))
}

async fn run_enrich(
    db_path: &str,
    org_chart: Option<PathBuf>,
    roster: Option<PathBuf>,
    output: Option<PathBuf>,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let config = open_config(db_path)?;

    // 命令行指定的路径只读本地文件，不再请求远程表格
    let org_source = match org_chart {
        Some(path) => DataSource::local(ORG_CHART_SOURCE_KEY, path),
        None => DataSource::local(
            ORG_CHART_SOURCE_KEY,
            config
                .get_org_chart_local_path()
                .await
                .map_err(|e| anyhow!("{}", e))?,
        )
        .with_remote(
            config
                .get_org_chart_remote_url()
                .await
                .map_err(|e| anyhow!("{}", e))?,
        ),
    };
    let roster_source = match roster {
        Some(path) => DataSource::local(ROSTER_SOURCE_KEY, path),
        None => DataSource::local(
            ROSTER_SOURCE_KEY,
            config
                .get_roster_local_path()
                .await
                .map_err(|e| anyhow!("{}", e))?,
        )
        .with_remote(
            config
                .get_roster_remote_url()
                .await
                .map_err(|e| anyhow!("{}", e))?,
        ),
    };

    let importer = RosterImporterImpl::with_default_components(config)
        .await
        .context("导入器初始化失败")?;
    let result = importer
        .import_and_enrich(&org_source, &roster_source)
        .await
        .context("花名册充实失败")?;

    match &output {
        Some(path) => write_enriched_csv_file(path, &result.records)
            .with_context(|| format!("写出 {} 失败", path.display()))?,
        None => write_enriched_csv(std::io::stdout().lock(), &result.records)
            .context("写出 stdout 失败")?,
    }

    if let Some(path) = &report_path {
        let json = serde_json::to_string_pretty(&result.report)?;
        std::fs::write(path, json).with_context(|| format!("写出 {} 失败", path.display()))?;
    }

    let summary = &result.report.summary;
    info!(
        total = summary.total_rows,
        exact = summary.exact,
        prefix = summary.prefix,
        normalized = summary.normalized_exact + summary.normalized_prefix,
        fallback = summary.fallback_existing,
        not_determined = summary.not_determined,
        errors = result.report.count_level(DqLevel::Error),
        conflicts = result.report.count_level(DqLevel::Conflict),
        elapsed_ms = result.elapsed_ms,
        "充实汇总"
    );
    if summary.quality_warning {
        warn!(
            ratio = %format!("{:.1}%", summary.nd_ratio * 100.0),
            "N/D 比例超过阈值"
        );
    }

    Ok(())
}

fn run_resolve(org_chart: &Path, codes: &[String]) -> Result<()> {
    let loader = DatasetLoader::new(Duration::from_secs(1))?;
    let loaded = loader
        .load_local(&DataSource::local(ORG_CHART_SOURCE_KEY, org_chart))
        .with_context(|| format!("读取 {} 失败", org_chart.display()))?;

    let index = OrgChartIndex::build::<Vec<String>, String>(&loaded.table.rows);
    info!(entries = index.len(), "组织架构索引已构建");

    let mut resolver = OrgResolver::new(&index);
    for code in codes {
        let resolution = resolver.resolve(Some(code.as_str()));
        println!(
            "{}\t{}\t{}\t{}\t{}",
            code,
            resolution.department,
            resolution.manager_tier1,
            resolution.manager_tier2,
            resolution.match_kind
        );
    }

    Ok(())
}

fn run_config(db_path: &str, action: ConfigAction) -> Result<()> {
    let config = open_config(db_path)?;

    match action {
        ConfigAction::Show => {
            let snapshot = config
                .get_config_snapshot()
                .map_err(|e| anyhow!("{}", e))?;
            println!("{}", snapshot);
        }
        ConfigAction::Set { key, value } => {
            if key == config_keys::ND_WARNING_RATIO {
                let ratio: f64 = value.parse().context("nd_warning_ratio 必须是数字")?;
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(anyhow!("nd_warning_ratio 必须在 0 到 1 之间"));
                }
            }
            config
                .set_global_config_value(&key, &value)
                .map_err(|e| anyhow!("{}", e))?;
            info!(key = %key, value = %value, "配置已更新");
        }
    }

    Ok(())
}
