use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use statspost::generator::{self, BenchmarkForm};
use statspost::http::{Client, SubmitRequest};
use statspost::job::{JobTracker, PollOutcome, SubmitOutcome};
use statspost::runner::{StatusReporter, WatchOutcome, Watcher};
use statspost::settings::{Settings, SettingsLoader};
use statspost::{Result, StatsError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 输出调试日志（RUST_LOG 优先）
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 设置文件，默认使用最近的 statspost.toml
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 输出由任务表单生成的配置文档
    Generate { form: PathBuf },

    /// 提交任务
    Submit(SubmitArgs),

    /// 查询一次任务的当前状态
    Poll {
        request_id: String,
        /// 同时输出服务端渲染的表格
        #[arg(long)]
        table: bool,
    },

    /// 轮询任务直到完成
    Watch {
        request_id: String,
        #[arg(long)]
        table: bool,
    },

    /// 下载任务产物
    Download {
        request_id: String,
        /// 下载原始响应而不是结果 CSV
        #[arg(long)]
        raw: bool,
        /// 等待任务完成后再下载结果
        #[arg(long)]
        wait: bool,
        /// 目标目录，覆盖设置文件中的配置
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct SubmitArgs {
    /// 任务表单（TOML）
    #[arg(required_unless_present = "config_file", conflicts_with = "config_file")]
    pub form: Option<PathBuf>,

    /// 现成的配置文档，原样上传
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// 请求数据 CSV 文件
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// 内联的请求数据
    #[arg(long)]
    pub data_text: Option<String>,

    /// 持续轮询直到任务完成
    #[arg(long)]
    pub watch: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings_path = cli.settings;

    match cli.command {
        Commands::Generate { form } => {
            let form = BenchmarkForm::load_from_path(form)?;
            println!("{}", generator::synthesize_config(&form)?);
            Ok(())
        }
        Commands::Submit(args) => {
            let (settings, client) = connect(settings_path)?;
            submit(client, &settings, args).await
        }
        Commands::Poll { request_id, table } => {
            let (_, client) = connect(settings_path)?;
            poll(client, &request_id, table).await
        }
        Commands::Watch { request_id, table } => {
            let (settings, client) = connect(settings_path)?;
            let mut tracker = JobTracker::new(client);
            tracker.attach(&request_id)?;
            watch(&mut tracker, &settings, StatusReporter::new(table)).await?;
            Ok(())
        }
        Commands::Download {
            request_id,
            raw,
            wait,
            output,
        } => {
            let (settings, client) = connect(settings_path)?;
            let output_dir = output.unwrap_or_else(|| settings.download.output_dir.clone());
            download(client, &settings, &request_id, raw, wait, output_dir).await
        }
    }
}

fn connect(settings_path: Option<PathBuf>) -> Result<(Settings, Client)> {
    let settings = SettingsLoader::resolve(settings_path.as_deref())?;
    let client = Client::new(&settings.server)?;
    tracing::debug!(base_url = %client.base_url(), "Using stats server");
    Ok((settings, client))
}

async fn submit(client: Client, settings: &Settings, args: SubmitArgs) -> Result<()> {
    let mut request = match (&args.form, &args.config_file) {
        (_, Some(path)) => SubmitRequest::new().with_configuration_file(path)?,
        (Some(path), None) => {
            let form = BenchmarkForm::load_from_path(path)?;
            SubmitRequest::new().with_configuration(generator::synthesize_config(&form)?)
        }
        (None, None) => return Err(StatsError::validation("Please provide a job form")),
    };
    if let Some(path) = &args.data {
        request = request.with_data_file(path)?;
    }
    if let Some(text) = args.data_text {
        request = request.with_data_text(text);
    }

    let reporter = StatusReporter::default();
    let mut tracker = JobTracker::new(client);

    match tracker.submit(&request).await? {
        SubmitOutcome::Redirect(uri) => {
            reporter.print_redirect(uri.as_deref());
            Ok(())
        }
        SubmitOutcome::Submitted {
            request_id,
            message,
        } => {
            reporter.print_submitted(&request_id, message.as_deref());
            if args.watch {
                watch(&mut tracker, settings, reporter).await?;
                return Ok(());
            }
            match tracker.poll().await? {
                PollOutcome::Updated(status) => reporter.print_status(&status),
                PollOutcome::Redirect(uri) => reporter.print_redirect(uri.as_deref()),
            }
            Ok(())
        }
    }
}

async fn poll(client: Client, request_id: &str, table: bool) -> Result<()> {
    let reporter = StatusReporter::new(table);
    let mut tracker = JobTracker::new(client);
    tracker.attach(request_id)?;

    match tracker.poll().await? {
        PollOutcome::Updated(status) => reporter.print_status(&status),
        PollOutcome::Redirect(uri) => reporter.print_redirect(uri.as_deref()),
    }
    Ok(())
}

/// 因登录重定向停止时返回 false
async fn watch(
    tracker: &mut JobTracker<Client>,
    settings: &Settings,
    reporter: StatusReporter,
) -> Result<bool> {
    let watcher = Watcher::from_settings(&settings.poll);

    let outcome = watcher.watch(tracker, &reporter).await?;
    match &outcome {
        WatchOutcome::Completed { status, .. } => reporter.print_status(status),
        WatchOutcome::Redirect(uri) => reporter.print_redirect(uri.as_deref()),
    }
    Ok(outcome.is_completed())
}

async fn download(
    client: Client,
    settings: &Settings,
    request_id: &str,
    raw: bool,
    wait: bool,
    output_dir: PathBuf,
) -> Result<()> {
    let mut tracker = JobTracker::new(client);
    tracker.attach(request_id)?;

    let artifact = if raw {
        tracker.raw_response_artifact()?
    } else {
        let ready = if wait {
            watch(&mut tracker, settings, StatusReporter::default()).await?
        } else {
            match tracker.poll().await? {
                PollOutcome::Updated(_) => true,
                PollOutcome::Redirect(uri) => {
                    StatusReporter::default().print_redirect(uri.as_deref());
                    false
                }
            }
        };
        if !ready {
            return Ok(());
        }
        tracker.results_artifact()?
    };

    let path = tracker.backend().download(&artifact, &output_dir).await?;
    println!("{} {}", "Saved".green(), path.display());
    Ok(())
}
