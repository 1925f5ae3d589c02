#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use serde::Deserialize;
use std::{env, fs, io::ErrorKind, path::Path};
use lazy_static::lazy_static;
use structopt::StructOpt;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

// Hello Utilities
use crate::utils::errors::Errors;
use crate::utils::hello_utils::get_absolute_path;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_HELLO_ROOT_DIR   : &str = "HELLO_ROOT_DIR";
const DEFAULT_ROOT_DIR     : &str = "~/.hello";
const CONFIG_DIR           : &str = "/config";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";  // relative to config dir
const HELLO_CONFIG_FILE    : &str = "/hello.toml";  // relative to config dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_HTTP_PORT    : u16  = 3000;

// Console logging used when no log4rs file is present.
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE the runtime context is initialized in main.
lazy_static! {
    pub static ref HELLO_ARGS: HelloArgs = init_hello_args();
}

// Calculate the data directories BEFORE the runtime context is initialized in main.
lazy_static! {
    pub static ref HELLO_DIRS: HelloDirs = init_hello_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HelloDirs:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct HelloDirs {
    pub config_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HelloArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "hello_args", about = "Command line arguments for Hello Server.")]
pub struct HelloArgs {
    /// Specify the server's root data directory.
    ///
    /// The root directory contains the config subdirectory, which may hold
    /// hello.toml and log4rs.yml.  The root directory is calculated using
    /// the following priority order:
    ///
    ///   1. If set, the value of the HELLO_ROOT_DIR environment,
    ///
    ///   2. Otherwise, if set, the value of the --root-dir command line argument,
    ///
    ///   3. Otherwise, ~/.hello
    ///
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Listen on this port instead of the configured one.
    #[structopt(short = "p", long)]
    pub http_port: Option<u16>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    /// Empty when the defaults were used.
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
}

impl RuntimeCtx {
    /// URL advertised in the generated OpenAPI document.
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.parms.config.http_addr, self.parms.config.http_port)
    }

    /// Where the configuration came from, for the startup log.
    pub fn config_source(&self) -> &str {
        if self.parms.config_file.is_empty() {"defaults"} else {self.parms.config_file.as_str()}
    }

    /// Address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.parms.config.http_port)
    }
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_hello_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_hello_args() -> HelloArgs {
    let args = HelloArgs::from_args();
    println!("{:?}", args);
    args
}

// ---------------------------------------------------------------------------
// init_hello_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories.  Directories that don't exist
 * are not created; their files simply fall back to defaults.
 */
fn init_hello_dirs() -> HelloDirs {
    let config_dir = get_root_dir() + CONFIG_DIR;
    HelloDirs { config_dir }
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env::var(ENV_HELLO_ROOT_DIR).unwrap_or_else(
        |_| {
            match HELLO_ARGS.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the config directory's log4rs.yml.  When that file
 * doesn't exist, log to the console at info level.
 */
pub fn init_log() -> Result<()> {
    let logconfig = init_log_config();
    if !Path::new(&logconfig).exists() {
        init_console_log()?;
        info!("Log4rs file {} not found, logging to console.", logconfig);
        return Ok(());
    }

    match log4rs::init_file(&logconfig, Default::default()) {
        Ok(_) => (),
        Err(e) => {
            println!("{}", e);
            return Err(anyhow!(Errors::Log4rsInitialization(logconfig)));
        },
    }
    info!("Log4rs initialized using: {}", logconfig);
    Ok(())
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    HELLO_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE
}

// ---------------------------------------------------------------------------
// init_console_log:
// ---------------------------------------------------------------------------
fn init_console_log() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from hello.toml in the config
 * directory.  If the file doesn't exist the default values are used.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path from its data directory.
    let config_file = get_absolute_path(&(HELLO_DIRS.config_dir.clone() + HELLO_CONFIG_FILE));

    // Read the configuration file.
    info!("Reading application configuration file: {}", config_file);
    let contents = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        },
        Err(e) => {
            let e = Errors::from(e);
            error!("{}: {}", config_file, e);
            return Err(anyhow!(e));
        },
    };

    let config = parse_config(&contents, &config_file)?;
    Ok(Parms { config_file, config })
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
/** Parse the toml configuration.  Keys not present take their default values. */
fn parse_config(contents: &str, config_file: &str) -> Result<Config> {
    match toml::from_str(contents) {
        Ok(c)  => Ok(c),
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file.to_string()), e);
            error!("{}", msg);
            Result::Err(anyhow!(msg))
        }
    }
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
/** Read the configuration and apply command line overrides. */
pub fn init_runtime_context() -> Result<RuntimeCtx> {
    let mut parms = get_parms()?;
    if let Some(port) = HELLO_ARGS.http_port {
        parms.config.http_port = port;
    }
    Ok(RuntimeCtx {parms})
}
