use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use proc_exit::{Code, ExitResult};
use vnext::{BumpType, PrereleaseType, ProjectIdentity, RequestBuilder, Scheme};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    logging: clap_verbosity_flag::Verbosity,
    /// Root of the git repository to resolve against
    #[arg(long, default_value = ".")]
    repo: PathBuf,
    /// Name of the project being resolved
    #[arg(short, long)]
    project: String,
    /// Repo-relative path of the project, if not the repo root
    #[arg(long, default_value = ".")]
    project_path: PathBuf,
    /// Prefix string to identify version number tags
    #[arg(short = 'x', long, default_value = "v")]
    prefix: String,
    /// Override the branch the resolution is evaluated on
    #[arg(long)]
    branch: Option<String>,
    /// Force the resolution to a literal version
    #[arg(long)]
    force: Option<String>,
    /// Floor bump applied regardless of what change detection finds
    #[arg(short = 'i', long, value_enum, default_value_t = BumpType::Patch)]
    default_increment: BumpType,
    /// Prerelease label appended on main-branch increments
    #[arg(long, value_enum, default_value_t = PrereleaseType::None)]
    prerelease: PrereleaseType,
    /// Versioning scheme
    #[arg(short, long, value_enum, default_value_t = Scheme::SemVer)]
    scheme: Scheme,
    /// Treat this project as test-only: skip resolution, return its base version
    #[arg(long)]
    test_project: bool,
    /// Skip resolution for non-packable projects
    #[arg(long)]
    skip_non_packable: bool,
    /// This project is not packable
    #[arg(long)]
    not_packable: bool,
    /// Confirm a major bump is approved, when the policy requires it
    #[arg(long)]
    major_approved: bool,
    /// Report the version number
    #[arg(short = 'n', long)]
    number: bool,
    /// Do not report the bump level
    #[arg(short = 'b', long)]
    no_bump: bool,
    /// Export the bump level into this environment variable
    #[clap(long, default_value = "VNEXT_BUMP")]
    set_env: Option<String>,
    /// Create the resolved tag in the repository
    #[arg(long)]
    create_tag: bool,
    /// Annotated tag message; lightweight tag if omitted
    #[arg(long)]
    tag_message: Option<String>,
    /// Report what tag creation would do without writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let result = run();
    proc_exit::exit(result);
}

fn run() -> ExitResult {
    let args = Cli::parse();

    let mut builder = get_logging(args.logging.log_level_filter());
    builder.init();

    match (args.number, args.no_bump) {
        (false, false) => log::info!("Resolving the next version level"),
        (false, true) => log::info!("Resolving the next version level"),
        (true, false) => log::info!("Resolving the next version number"),
        (true, true) => log::info!("Resolving the next version number and level"),
    };

    let project = ProjectIdentity::new(args.project.clone(), args.project_path.clone())
        .with_test(args.test_project)
        .with_packable(!args.not_packable);

    let mut builder = RequestBuilder::new(args.repo.clone(), project)
        .set_tag_prefix(&args.prefix)
        .set_default_increment(args.default_increment)
        .set_prerelease_type(args.prerelease)
        .set_scheme(args.scheme)
        .set_skip_tests(args.test_project)
        .set_skip_non_packable(args.skip_non_packable)
        .set_major_approved(args.major_approved);

    if let Some(branch) = &args.branch {
        builder = builder.set_branch_type_override(branch);
    }
    if let Some(force) = &args.force {
        builder = builder.set_force_version(vnext::Version::parse(force)?);
    }

    let request = builder.build()?;
    let result = vnext::resolve(&request)?;

    log::debug!("resolution reason: {}", result.change_reason);
    if !result.validation.is_valid {
        log::warn!("validation failed: {:?}", result.validation.errors);
    }

    if let Some(key) = args.set_env {
        std::env::set_var(key, result.bump_type.to_string());
    }

    if args.create_tag {
        let outcome =
            vnext::create_tag(&request, &result, args.tag_message.as_deref(), args.dry_run)?;
        log::info!("tag creation: {outcome:?}");
    }

    println!("{}", report(&result, args.number, args.no_bump));

    Code::SUCCESS.ok()
}

fn report(result: &vnext::VersionResult, report_number: bool, no_bump: bool) -> String {
    let bump = colorize_bump(result.bump_type);
    match (!no_bump, report_number) {
        (true, true) => format!("{bump}\n{}", result.version_string),
        (false, true) => result.version_string.clone(),
        (true, false) => bump,
        (false, false) => String::new(),
    }
}

fn colorize_bump(bump: BumpType) -> String {
    match bump {
        BumpType::Major => bump.to_string().red().to_string(),
        BumpType::Minor => bump.to_string().yellow().to_string(),
        BumpType::Patch => bump.to_string().green().to_string(),
        BumpType::None => bump.to_string().dimmed().to_string(),
    }
}

fn get_logging(level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, level);

    builder.format_timestamp_secs().format_module_path(false);

    builder
}
