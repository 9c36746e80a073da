use anyhow::{bail, Result};
use labels_client::{LabelClient, Transport};
use labels_core::Properties;
use serde_json::json;
use tracing::info;

use crate::config::Command;

/// Run one subcommand and return what should be printed on stdout.
pub async fn run<T: Transport>(client: &LabelClient<T>, command: Command) -> Result<String> {
    match command {
        Command::List => {
            let labels = client.find_labels().await?;
            info!("{} labels", labels.len());
            pretty(&labels)
        }
        Command::Get { id } => match client.find_label_by_id(&id).await? {
            Some(label) => pretty(&label),
            None => bail!("label {id} not found"),
        },
        Command::Create { name, properties } => {
            let label = client
                .create_label(&name, properties.into_iter().collect::<Properties>())
                .await?;
            pretty(&label)
        }
        Command::Update {
            id,
            name,
            properties,
        } => {
            let Some(mut label) = client.find_label_by_id(&id).await? else {
                bail!("label {id} not found");
            };
            if let Some(name) = name {
                label.name = name;
            }
            label.properties.extend(properties);
            let updated = client.update_label(&label).await?;
            pretty(&updated)
        }
        Command::Delete { id } => {
            client.delete_label_by_id(&id).await?;
            Ok(json!({ "deleted": id }).to_string())
        }
    }
}

fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use labels_client::MemoryTransport;
    use labels_core::Label;

    use super::*;

    fn client() -> LabelClient<MemoryTransport> {
        LabelClient::new(MemoryTransport::new())
    }

    fn parse_label(output: &str) -> Label {
        serde_json::from_str(output).unwrap()
    }

    fn create(name: &str, properties: &[(&str, &str)]) -> Command {
        Command::Create {
            name: name.into(),
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let client = client();
        let out = run(&client, create("Cool Resource", &[("color", "red")]))
            .await
            .unwrap();
        let created = parse_label(&out);
        assert_eq!(created.properties["color"], "red");

        let out = run(&client, Command::Get { id: created.id.clone() })
            .await
            .unwrap();
        assert_eq!(parse_label(&out), created);
    }

    #[tokio::test]
    async fn update_merges_into_current_properties() {
        let client = client();
        let out = run(&client, create("x", &[("color", "blue"), ("type", "free")]))
            .await
            .unwrap();
        let id = parse_label(&out).id;

        let out = run(
            &client,
            Command::Update {
                id,
                name: Some("renamed".into()),
                properties: vec![
                    ("type".into(), "paid".into()),
                    ("color".into(), String::new()),
                ],
            },
        )
        .await
        .unwrap();
        let updated = parse_label(&out);
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.properties.len(), 1);
        assert_eq!(updated.properties["type"], "paid");
    }

    #[tokio::test]
    async fn missing_label_is_an_error_for_get_and_update() {
        let client = client();
        let err = run(&client, Command::Get { id: "020f755c3c082000".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "label 020f755c3c082000 not found");

        let err = run(
            &client,
            Command::Update {
                id: "020f755c3c082000".into(),
                name: None,
                properties: vec![],
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn delete_and_list() {
        let client = client();
        let out = run(&client, create("x", &[])).await.unwrap();
        let id = parse_label(&out).id;

        let listed: Vec<Label> =
            serde_json::from_str(&run(&client, Command::List).await.unwrap()).unwrap();
        assert_eq!(listed.len(), 1);

        run(&client, Command::Delete { id: id.clone() }).await.unwrap();
        run(&client, Command::Delete { id }).await.unwrap();
        assert_eq!(run(&client, Command::List).await.unwrap(), "[]");
    }
}
