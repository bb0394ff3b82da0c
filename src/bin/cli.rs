use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use schoolhub::state::{AppState, Stores, run_migrations};
use schoolhub_config::AppConfig;
use schoolhub_core::{Sanitize, field_errors, sanitize_str};
use schoolhub_db::init_db_pool;
use schoolhub_models::{RegisterRequest, User, UserRole};
use validator::Validate;

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Username (prompted if not provided)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// teacher, parent, student or admin
        #[arg(short = 'r', long, default_value = "parent")]
        role: UserRole,

        /// Subject taught, for teachers
        #[arg(short = 's', long)]
        subject: Option<String>,
    },
    /// Assign a class to a teacher
    AssignClass {
        /// Teacher username
        teacher: String,

        /// Class name, e.g. 3B
        class_name: String,
    },
    /// List the classes assigned to a teacher
    ListClasses {
        /// Teacher username
        teacher: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let Some(database_url) = config.database.url.as_deref() else {
        bail!("DATABASE_URL must be set");
    };

    let pool = init_db_pool(database_url, 5)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await?;

    let state = AppState::new(
        Stores::postgres(pool),
        config.jwt.clone(),
        config.password,
        config.cors.clone(),
    );

    match cli.command {
        Commands::CreateUser {
            username,
            password,
            role,
            subject,
        } => handle_create_user(&state, username, password, role, subject).await,
        Commands::AssignClass {
            teacher,
            class_name,
        } => handle_assign_class(&state, &teacher, &class_name).await,
        Commands::ListClasses { teacher } => handle_list_classes(&state, &teacher).await,
    }
}

async fn handle_create_user(
    state: &AppState,
    username: Option<String>,
    password: Option<String>,
    role: UserRole,
    subject: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let request = RegisterRequest {
        username,
        password,
        role,
        subject,
    };
    if let Err(errors) = request.validate() {
        let details = field_errors(&errors)
            .into_iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect::<Vec<_>>()
            .join("\n   ");
        bail!("Invalid user\n   {}", details);
    }

    let user = state.users.create_user(request.sanitize()).await?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Username: {}", user.username);
    println!("   Role: {}", user.role);
    if let Some(subject) = &user.subject {
        println!("   Subject: {}", subject);
    }
    Ok(())
}

async fn find_teacher(state: &AppState, username: &str) -> anyhow::Result<User> {
    let Some(user) = state.users.find_by_username(username).await? else {
        bail!("No user named '{}'", username);
    };
    if user.role != UserRole::Teacher {
        bail!("'{}' is a {}, not a teacher", username, user.role);
    }
    Ok(user)
}

async fn handle_assign_class(
    state: &AppState,
    teacher: &str,
    class_name: &str,
) -> anyhow::Result<()> {
    let teacher = find_teacher(state, teacher).await?;
    let class_name = sanitize_str(class_name);

    if state.classes.assign_class(teacher.id, &class_name).await? {
        println!(
            "\n✅ Class {} assigned to {}",
            class_name,
            teacher.username
        );
    } else {
        println!(
            "\nℹ️  {} already teaches {}",
            teacher.username,
            class_name
        );
    }
    Ok(())
}

async fn handle_list_classes(state: &AppState, teacher: &str) -> anyhow::Result<()> {
    let teacher = find_teacher(state, teacher).await?;
    let classes = state.classes.classes_for(teacher.id).await?;

    if classes.is_empty() {
        println!("{} has no classes", teacher.username);
    } else {
        println!("Classes for {}:", teacher.username);
        for class in classes {
            println!("  - {}", class);
        }
    }
    Ok(())
}
