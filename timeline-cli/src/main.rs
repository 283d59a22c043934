use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use timeline_common::SiteConfig;

mod scaffold;
mod scan;

fn main() {
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("scaffold", args)) => run_scaffold(args),
        Some(("scan", args)) => run_scan(args),
        _ => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("错误: {:#}", e);
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("时光日记工具")
        .version(env!("CARGO_PKG_VERSION"))
        .about("生成日记日期文件夹，并在本地预览时间线")
        .subcommand_required(true)
        .subcommand(
            Command::new("scaffold")
                .about("按 年/月/日-星期 生成日记文件夹")
                .arg(Arg::new("year")
                    .short('y')
                    .long("year")
                    .value_name("YYYY")
                    .help("年份")
                    .value_parser(value_parser!(i32))
                    .required(true))
                .arg(Arg::new("month")
                    .short('m')
                    .long("month")
                    .value_name("MONTH")
                    .help("月份 (1-12)，不填则生成全年")
                    .value_parser(value_parser!(u32)))
                .arg(Arg::new("root")
                    .short('r')
                    .long("root")
                    .value_name("ROOT_DIR")
                    .help("日记根目录")
                    .default_value("posts"))
                .arg(verbose_arg()),
        )
        .subcommand(
            Command::new("scan")
                .about("扫描本地仓库，按浏览器端的规则输出时间线")
                .arg(Arg::new("source")
                    .short('s')
                    .long("source")
                    .value_name("SOURCE_DIR")
                    .help("本地仓库路径")
                    .required(true))
                .arg(Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("CONFIG_JSON")
                    .help("站点配置文件 (JSON，字段与页面中的 NOTETIME_CONFIG 相同)"))
                .arg(Arg::new("base")
                    .short('b')
                    .long("base")
                    .value_name("BASE_PATH")
                    .help("日记根目录，覆盖配置文件中的 basePath"))
                .arg(Arg::new("owner")
                    .long("owner")
                    .value_name("OWNER")
                    .help("GitHub 用户名，覆盖配置文件中的 repoOwner"))
                .arg(Arg::new("repo")
                    .long("repo")
                    .value_name("REPO")
                    .help("仓库名，覆盖配置文件中的 repoName"))
                .arg(Arg::new("branch")
                    .long("branch")
                    .value_name("BRANCH")
                    .help("分支名，覆盖配置文件中的 branch"))
                .arg(Arg::new("json")
                    .long("json")
                    .help("以 JSON 输出")
                    .action(ArgAction::SetTrue))
                .arg(verbose_arg()),
        )
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("显示详细信息")
        .action(ArgAction::SetTrue)
}

fn run_scaffold(args: &ArgMatches) -> Result<()> {
    let year = *args.get_one::<i32>("year").context("缺少年份")?;
    let root = Path::new(args.get_one::<String>("root").context("缺少根目录")?);
    let verbose = args.get_flag("verbose");

    let created = match args.get_one::<u32>("month") {
        Some(&month) => scaffold::scaffold_month(root, year, month, verbose)?,
        None => scaffold::scaffold_year(root, year, verbose)?,
    };
    println!("完成，新建 {} 个日期文件夹。", created.len());
    Ok(())
}

fn run_scan(args: &ArgMatches) -> Result<()> {
    let source = Path::new(args.get_one::<String>("source").context("缺少源目录")?);
    if !source.is_dir() {
        anyhow::bail!("源目录不存在或不是有效目录 '{}'", source.display());
    }
    let verbose = args.get_flag("verbose");
    let json = args.get_flag("json");

    let config = scan_config(args)?;
    let start_time = std::time::Instant::now();
    let report = scan::scan(source, &config, verbose && !json)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        scan::print_report(&report, verbose);
        if verbose {
            println!("扫描耗时: {:.2}秒", start_time.elapsed().as_secs_f32());
        }
    }
    Ok(())
}

/// 配置文件打底，命令行参数覆盖；结果无效时直接报错
fn scan_config(args: &ArgMatches) -> Result<SiteConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => load_config(Path::new(path))?,
        None => SiteConfig::default(),
    };

    let overrides = [
        ("owner", &mut config.repo_owner),
        ("repo", &mut config.repo_name),
        ("branch", &mut config.branch),
        ("base", &mut config.base_path),
    ];
    for (name, field) in overrides {
        if let Some(value) = args.get_one::<String>(name) {
            *field = value.clone();
        }
    }

    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<SiteConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("配置文件格式错误 {}", path.display()))
}
