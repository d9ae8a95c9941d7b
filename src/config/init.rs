// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Writes a commented vigil.yml template.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{ImageRef, ServiceId};

use super::{CONFIG_FILENAME, Config, ENV_API_KEY};

pub fn init_config(
    dir: &Path,
    service_id: Option<&str>,
    image: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(id) = service_id {
        let id = ServiceId::new(id.trim());
        if id.is_blank() {
            return Err(Error::InvalidConfig("service_id cannot be empty".into()));
        }
        config.service_id = id;
    }

    if let Some(i) = image {
        config.image = Some(ImageRef::parse(i).map_err(|e| Error::InvalidConfig(e.to_string()))?);
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let image = config
        .image
        .as_ref()
        .map(|i| format!("image: {i}"))
        .unwrap_or_else(|| "# image: ghcr.io/my-org/my-app:latest".to_string());

    format!(
        r#"service_id: {service_id}
api_key:
  env: {api_key_env}
{image}
clear_cache: true

polling:
  interval: 30s
  timeout: 30m

health:
  path: /health
  attempts: 10
  interval: 30s
  # Set to false to only warn when the service never reports healthy
  required: true

# destinations:
#   staging:
#     service_id: srv-staging
"#,
        service_id = config.service_id,
        api_key_env = ENV_API_KEY,
    )
}
