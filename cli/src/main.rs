mod transport;


use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use session::context::LogOnly;
use session::{
    ApiClient, ApiError, ApiRoot, AuthError, AuthManager, ConfigError, Identity, Notice, Notifier, SessionContext,
    gateway, routes, store::FileStore,
};
use tracing_subscriber::EnvFilter;

use crate::transport::ReqwestTransport;

const EMPLOYEE_ROLE_ID: i64 = 3;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `bodegix-cli login` first")]
    NotSignedIn,
    #[error("no company id; pass --empresa-id or sign in as a client")]
    MissingCompany,
    #[error("{0}")]
    Api(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(status) => Self::Api(format!("HTTP {status}: {}", err.user_message())),
            None => Self::Api(err.to_string()),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bodegix-cli", about = "Bodegix backend CLI")]
struct Cli {
    /// Backend root; `/api` is appended when missing.
    #[arg(long, env = "BODEGIX_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "BODEGIX_TOKEN_FILE", default_value = ".bodegix/token")]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password and store the session token.
    Login {
        correo: String,
        #[arg(long, env = "BODEGIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in with a Google ID credential.
    GoogleLogin { credential: String },
    Logout,
    /// Print the identity decoded from the stored token.
    Whoami,
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    Empresa(EmpresaCommand),
    Usuario(UsuarioCommand),
    Locker(LockerCommand),
    Suscripcion(SuscripcionCommand),
    Planes,
    /// Latest sensor reading per locker.
    Lecturas,
    /// Total platform income.
    Ingresos,
    /// Raw `GET` of any endpoint under `/api`.
    Get { path: String },
}

#[derive(Args, Debug)]
struct EmpresaCommand {
    #[command(subcommand)]
    command: EmpresaSubcommand,
}

#[derive(Subcommand, Debug)]
enum EmpresaSubcommand {
    List,
    Create {
        nombre: String,
        #[arg(long)]
        direccion: Option<String>,
        #[arg(long)]
        telefono: Option<String>,
    },
}

#[derive(Args, Debug)]
struct UsuarioCommand {
    #[command(subcommand)]
    command: UsuarioSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsuarioSubcommand {
    /// Company administrators.
    Admins,
    Employees {
        #[arg(long)]
        empresa_id: Option<i64>,
    },
    Read {
        id: String,
    },
    CreateEmployee {
        nombre: String,
        correo: String,
        #[arg(long, env = "BODEGIX_EMPLOYEE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        empresa_id: Option<i64>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct LockerCommand {
    #[command(subcommand)]
    command: LockerSubcommand,
}

#[derive(Subcommand, Debug)]
enum LockerSubcommand {
    /// All lockers, or one company's with `--empresa-id`.
    List {
        #[arg(long)]
        empresa_id: Option<i64>,
    },
    /// Assign a locker to a user; omit `--usuario-id` to unassign.
    Assign {
        locker_id: i64,
        #[arg(long)]
        usuario_id: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct SuscripcionCommand {
    #[command(subcommand)]
    command: SuscripcionSubcommand,
}

#[derive(Subcommand, Debug)]
enum SuscripcionSubcommand {
    List,
    Status {
        #[arg(long)]
        empresa_id: Option<i64>,
    },
    Cancel {
        id: i64,
    },
}

/// Prints session notices to stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        eprintln!("{}", notice.text());
    }
}

struct CliContext {
    auth: AuthManager,
    api: ApiClient<ReqwestTransport>,
}

impl CliContext {
    fn new(api_url: Option<&str>, token_file: PathBuf) -> Result<Self, CliError> {
        let store = Arc::new(FileStore::new(token_file));
        let context = SessionContext::new(store, Arc::new(LogOnly), Arc::new(TerminalNotifier));
        let root = ApiRoot::resolve(api_url, None)?;
        let auth = AuthManager::new(context.clone());
        auth.initialize();
        let api = ApiClient::new(root, context, ReqwestTransport::default());
        Ok(Self { auth, api })
    }

    fn identity(&self) -> Result<Identity, CliError> {
        self.auth.identity().ok_or(CliError::NotSignedIn)
    }

    fn company(&self, explicit: Option<i64>) -> Result<i64, CliError> {
        resolve_company(explicit, self.auth.identity().as_ref())
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext::new(cli.api_url.as_deref(), cli.token_file)?;

    match cli.command {
        Command::Login { correo, password } => {
            let body = ctx
                .api
                .post("/usuarios/login", json!({ "correo": correo, "contraseña": password }))
                .await?;
            establish_session(&ctx, &body)
        }
        Command::GoogleLogin { credential } => {
            let body = ctx.api.post("/usuarios/google-login", json!({ "token": credential })).await?;
            establish_session(&ctx, &body)
        }
        Command::Logout => {
            if let Err(e) = ctx.api.post("/usuarios/logout", json!({})).await {
                tracing::warn!(error = %e, "backend logout failed");
            }
            ctx.auth.logout();
            println!("signed out");
            Ok(())
        }
        Command::Whoami => print_json(&whoami(&ctx.identity()?)),
        Command::Api(api) => run_api(&ctx, api).await,
    }
}

fn establish_session(ctx: &CliContext, body: &Value) -> Result<(), CliError> {
    let token = gateway::login_token(body)?;
    let identity = ctx.auth.login(&token)?;
    if let Err(err) = ctx.auth.landing_route() {
        ctx.auth.logout();
        return Err(err.into());
    }
    print_json(&whoami(&identity))
}

async fn run_api(ctx: &CliContext, api: ApiCommand) -> Result<(), CliError> {
    let value = match api.command {
        ApiSubcommand::Empresa(cmd) => match cmd.command {
            EmpresaSubcommand::List => ctx.api.get("/empresas").await?,
            EmpresaSubcommand::Create { nombre, direccion, telefono } => {
                ctx.api.post("/empresas", empresa_body(&nombre, direccion, telefono)).await?
            }
        },
        ApiSubcommand::Usuario(cmd) => match cmd.command {
            UsuarioSubcommand::Admins => ctx.api.get("/usuarios/admin").await?,
            UsuarioSubcommand::Employees { empresa_id } => {
                let empresa_id = ctx.company(empresa_id)?;
                let query = [("rol_id", EMPLOYEE_ROLE_ID.to_string()), ("empresa_id", empresa_id.to_string())];
                ctx.api.get_with_query("/usuarios", &query).await?
            }
            UsuarioSubcommand::Read { id } => ctx.api.get(&format!("/usuarios/{id}")).await?,
            UsuarioSubcommand::CreateEmployee { nombre, correo, password, empresa_id } => {
                let empresa_id = ctx.company(empresa_id)?;
                ctx.api.post("/usuarios", employee_body(&nombre, &correo, &password, empresa_id)).await?
            }
            UsuarioSubcommand::Delete { id } => ctx.api.delete(&format!("/usuarios/{id}")).await?,
        },
        ApiSubcommand::Locker(cmd) => match cmd.command {
            LockerSubcommand::List { empresa_id: Some(id) } => ctx.api.get(&format!("/lockers/empresa/{id}")).await?,
            LockerSubcommand::List { empresa_id: None } => ctx.api.get("/lockers").await?,
            LockerSubcommand::Assign { locker_id, usuario_id } => {
                ctx.api.put(&format!("/lockers/{locker_id}"), json!({ "usuario_id": usuario_id })).await?
            }
        },
        ApiSubcommand::Suscripcion(cmd) => match cmd.command {
            SuscripcionSubcommand::List => ctx.api.get("/suscripciones").await?,
            SuscripcionSubcommand::Status { empresa_id } => {
                let empresa_id = ctx.company(empresa_id)?;
                ctx.api.get_with_query("/suscripciones/status", &[("empresa_id", empresa_id.to_string())]).await?
            }
            SuscripcionSubcommand::Cancel { id } => {
                ctx.api.put(&format!("/suscripciones/{id}"), json!({ "estado": "cancelada" })).await?
            }
        },
        ApiSubcommand::Planes => ctx.api.get("/planes").await?,
        ApiSubcommand::Lecturas => ctx.api.get("/temperaturas/latest-all").await?,
        ApiSubcommand::Ingresos => ctx.api.get("/reports/ingresos/totales").await?,
        ApiSubcommand::Get { path } => ctx.api.get(&path).await?,
    };
    print_json(&value)
}

fn resolve_company(explicit: Option<i64>, identity: Option<&Identity>) -> Result<i64, CliError> {
    explicit
        .or_else(|| identity.and_then(|i| i.company_id))
        .ok_or(CliError::MissingCompany)
}

fn empresa_body(nombre: &str, direccion: Option<String>, telefono: Option<String>) -> Value {
    let mut body = Map::new();
    body.insert("nombre".to_owned(), Value::String(nombre.to_owned()));
    if let Some(direccion) = direccion {
        body.insert("direccion".to_owned(), Value::String(direccion));
    }
    if let Some(telefono) = telefono {
        body.insert("telefono".to_owned(), Value::String(telefono));
    }
    Value::Object(body)
}

fn employee_body(nombre: &str, correo: &str, password: &str, empresa_id: i64) -> Value {
    json!({
        "nombre": nombre,
        "correo": correo,
        "contraseña": password,
        "rol_id": EMPLOYEE_ROLE_ID,
        "empresa_id": empresa_id,
    })
}

fn whoami(identity: &Identity) -> Value {
    let role = identity.role();
    let menu: Vec<&str> = routes::menu_for(identity).iter().map(|r| r.path).collect();
    json!({
        "identity": identity,
        "role": role.map(|r| r.name()),
        "landing": role.and_then(routes::landing_for),
        "routes": menu,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
