//! Generate-only submission: prints the unsigned transaction body.

use serde_json::json;
use wasm::{client::cli::tx::TxSubmitter, message::Message};

use crate::config::OutputFormat;

#[derive(Debug, Clone)]
pub struct GenerateOnly {
    pub chain_id: Option<String>,
    pub output: OutputFormat,
}

impl TxSubmitter for GenerateOnly {
    type Output = String;
    type Error = serde_json::Error;

    fn submit(&self, msg: Message) -> Result<Self::Output, Self::Error> {
        tracing::info!("generating unsigned {} transaction", msg.type_url());

        let tx = json!({
            "body": {
                "messages": [msg],
                "memo": "",
            },
            "chain_id": self.chain_id.clone().unwrap_or_default(),
        });

        match self.output {
            OutputFormat::Json => serde_json::to_string(&tx),
            OutputFormat::Text => serde_json::to_string_pretty(&tx),
        }
    }
}

#[cfg(test)]
mod tests {
    use address::AccAddress;
    use wasm::message::MsgClearAdmin;

    use super::*;

    #[test]
    fn prints_message_with_type_url() {
        let msg = Message::ClearAdmin(MsgClearAdmin {
            sender: AccAddress::from_bech32("cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux")
                .unwrap(),
            contract: AccAddress::from_bech32(
                "cosmos1qurswpc8qurswpc8qurswpc8qurswpc8qurswpc8qurswpc8qurs79d55s",
            )
            .unwrap(),
        });

        let submitter = GenerateOnly {
            chain_id: Some("testing-1".to_owned()),
            output: OutputFormat::Json,
        };
        let out = submitter.submit(msg).unwrap();
        let tx: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(tx["chain_id"], "testing-1");
        assert_eq!(
            tx["body"]["messages"][0]["@type"],
            "/cosmwasm.wasm.v1.MsgClearAdmin"
        );
        assert_eq!(
            tx["body"]["messages"][0]["sender"],
            "cosmos1syavy2npfyt9tcncdtsdzf7kny9lh777pahuux"
        );
    }
}
