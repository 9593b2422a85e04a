//! Entry point for the arcticmon TUI. Parses args, resolves the profile and runs the App.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use arcticmon::app::App;
use arcticmon::client::{BasicAuth, ServerClient};
use arcticmon::logging::{default_log_path, init_logging};
use arcticmon::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ProfilesFile, ResolveProfile,
};

const PASSWORD_ENV: &str = "ARCTICMON_PASSWORD";

struct ParsedArgs {
    url: Option<String>,
    tls_ca: Option<String>,
    user: Option<String>,
    profile: Option<String>,
    log: Option<PathBuf>,
    save: bool,
    dry_run: bool,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--profile NAME|-P NAME] [--save] [--tls-ca CERT_PEM|-t CERT_PEM] \
         [--user USER|-u USER] [--log FILE] [--dry-run] [http://HOST:PORT]\n\
         Basic-auth password is read from {PASSWORD_ENV}."
    )
}

enum Parse {
    Run(ParsedArgs),
    Help(String),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Parse, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "arcticmon".into());
    let mut url: Option<String> = None;
    let mut tls_ca: Option<String> = None;
    let mut user: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut log: Option<PathBuf> = None;
    let mut save = false; // --save
    let mut dry_run = false; // --dry-run

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Parse::Help(usage(&prog))),
            "--tls-ca" | "-t" => {
                tls_ca = it.next();
            }
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--user" | "-u" => {
                user = it.next();
            }
            "--log" => {
                log = it.next().map(PathBuf::from);
            }
            "--save" => {
                save = true;
            }
            "--dry-run" => {
                dry_run = true;
            }
            _ if arg.starts_with("--tls-ca=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        tls_ca = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--user=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        user = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option {arg}. {}", usage(&prog)));
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(Parse::Run(ParsedArgs {
        url,
        tls_ca,
        user,
        profile,
        log,
        save,
        dry_run,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(Parse::Run(v)) => v,
        Ok(Parse::Help(text)) => {
            println!("{text}");
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let Some(target) = resolve_target(&parsed)? else {
        return Ok(());
    };

    if parsed.dry_run {
        println!("url: {}", target.url);
        if let Some(ca) = &target.tls_ca {
            println!("tls_ca: {ca}");
        }
        if let Some(user) = &target.user {
            println!("user: {user}");
        }
        return Ok(());
    }

    let log_path = parsed.log.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path);
    tracing::info!(url = %target.url, "starting arcticmon");

    let auth = target.user.clone().map(|user| BasicAuth {
        user,
        password: env::var(PASSWORD_ENV).ok(),
    });
    let client = ServerClient::new(&target.url, target.tls_ca.as_deref(), auth)
        .with_context(|| format!("invalid server address {}", target.url))?;

    let mut app = App::new(client);
    app.run().await
}

/// Turn flags and saved profiles into the server to talk to. `None` means the
/// operator aborted or there was nothing to connect to.
fn resolve_target(parsed: &ParsedArgs) -> anyhow::Result<Option<ProfileEntry>> {
    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        tls_ca: parsed.tls_ca.clone(),
        user: parsed.user.clone(),
    };

    let mut profiles_mut = profiles_file.clone();
    let entry = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(entry) => {
            // Possibly save if profile specified and --save or new entry
            if let Some(name) = parsed.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        store(&mut profiles_mut, name, &entry);
                    }
                    Some(existing) if *existing != entry => {
                        let overwrite = parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ));
                        if overwrite {
                            store(&mut profiles_mut, name, &entry);
                        }
                    }
                    Some(_) => {}
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| names.get(idx))
                .and_then(|name| profiles_mut.profiles.get(name));
            match picked {
                Some(entry) => entry.clone(),
                None => return Ok(None),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (http://HOST:PORT or https://...): ")?;
            if url.trim().is_empty() {
                return Ok(None);
            }
            let ca = prompt_string("Enter TLS CA path (or leave blank): ")?;
            let user = prompt_string("Enter basic-auth user (or leave blank): ")?;
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                tls_ca: non_empty(&ca).or_else(|| parsed.tls_ca.clone()),
                user: non_empty(&user).or_else(|| parsed.user.clone()),
            };
            store(&mut profiles_mut, &name, &entry);
            entry
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(None);
        }
    };
    Ok(Some(entry))
}

fn store(pf: &mut ProfilesFile, name: &str, entry: &ProfileEntry) {
    pf.profiles.insert(name.to_string(), entry.clone());
    if let Err(e) = save_profiles(pf) {
        eprintln!("warning: could not save profile '{name}': {e}");
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
