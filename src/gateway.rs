// gateway.rs - Discord Gateway Platform
// Serenity-backed implementation of the platform traits. Opening the session
// starts the gateway runner in the background and waits for the ready event;
// commands are registered globally through the HTTP client.
//
// Key Features:
// - Connection errors surface from open() instead of from a detached task
// - Application command interactions are translated and routed through the
//   dispatcher attached with subscribe()
// - close() shuts down every shard and joins the runner

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::Serialize;
use serenity::{
    client::{bridge::gateway::ShardManager, Client, Context, EventHandler},
    http::Http,
    model::{
        application::{
            command::Command,
            interaction::Interaction as GatewayInteraction,
        },
        gateway::Ready,
        id::CommandId as DiscordCommandId,
    },
    prelude::{GatewayIntents, Mutex},
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::commands::slash::Dispatcher;
use crate::commands::SlashCommand;
use crate::config::Config;
use crate::error::PlatformError;
use crate::platform::{CommandId, Interaction, Platform, RegisteredCommand, Responder};

// Interaction callback type: respond immediately with a channel message
const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

#[derive(Debug, Serialize, PartialEq)]
struct InteractionReply<'a> {
    #[serde(rename = "type")]
    kind: u8,
    data: ReplyData<'a>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ReplyData<'a> {
    content: &'a str,
}

fn reply_body(content: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(InteractionReply {
        kind: CHANNEL_MESSAGE_WITH_SOURCE,
        data: ReplyData { content },
    })
}

async fn send_reply(http: &Http, interaction: &Interaction, content: &str) -> Result<(), PlatformError> {
    let body = reply_body(content)?;
    http.create_interaction_response(interaction.id, &interaction.token, &body)
        .await?;
    Ok(())
}

/// Reply channel used for interactions arriving on the gateway
struct HttpResponder {
    http: Arc<Http>,
}

#[async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, interaction: &Interaction, content: &str) -> Result<(), PlatformError> {
        send_reply(&self.http, interaction, content).await
    }
}

type DispatcherSlot = Arc<OnceCell<Arc<Dispatcher>>>;

// Serenity event handler. Signals readiness once and forwards slash command
// interactions to the dispatcher once one is attached.
struct Handler {
    ready_tx: Mutex<Option<oneshot::Sender<u64>>>,
    dispatcher: DispatcherSlot,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: Context, ready: Ready) {
        log::info!("✅ Bot connected as {}!", ready.user.name);
        // Reconnects fire ready again; only the first one completes open()
        if let Some(tx) = self.ready_tx.lock().await.take() {
            let _ = tx.send(ready.application.id.0);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: GatewayInteraction) {
        let GatewayInteraction::ApplicationCommand(command) = interaction else {
            return;
        };
        let Some(dispatcher) = self.dispatcher.get() else {
            log::debug!("Interaction /{} arrived before commands were attached", command.data.name);
            return;
        };

        let interaction = Interaction {
            id: command.id.0,
            token: command.token,
            command_name: command.data.name,
            user: command.user.name,
        };
        log::debug!("/{} invoked by {}", interaction.command_name, interaction.user);

        let responder = HttpResponder { http: ctx.http.clone() };
        dispatcher.dispatch(&responder, &interaction).await;
    }
}

struct Session {
    http: Arc<Http>,
    shard_manager: Arc<Mutex<ShardManager>>,
    runner: JoinHandle<Result<(), serenity::Error>>,
}

pub struct Gateway {
    config: Config,
    dispatcher: DispatcherSlot,
    session: Option<Session>,
}

impl Gateway {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dispatcher: Arc::new(OnceCell::new()),
            session: None,
        }
    }

    fn http(&self) -> Result<&Arc<Http>, PlatformError> {
        match &self.session {
            Some(session) => Ok(&session.http),
            None => Err("Discord session is not open".into()),
        }
    }
}

#[async_trait]
impl Responder for Gateway {
    async fn respond(&self, interaction: &Interaction, content: &str) -> Result<(), PlatformError> {
        send_reply(self.http()?, interaction, content).await
    }
}

#[async_trait]
impl Platform for Gateway {
    async fn open(&mut self) -> Result<(), PlatformError> {
        let (ready_tx, ready_rx) = oneshot::channel();
        let handler = Handler {
            ready_tx: Mutex::new(Some(ready_tx)),
            dispatcher: self.dispatcher.clone(),
        };

        let mut client = Client::builder(self.config.token.as_str(), GatewayIntents::non_privileged())
            .event_handler(handler)
            .await?;
        let shard_manager = client.shard_manager.clone();
        let http = client.cache_and_http.http.clone();

        log::debug!("🔧 Starting gateway runner...");
        let mut runner = tokio::spawn(async move { client.start().await });

        tokio::select! {
            ready = ready_rx => {
                let application_id = ready.map_err(|_| "gateway stopped before the session was ready")?;
                http.set_application_id(application_id);
            }
            finished = &mut runner => {
                return Err(match finished {
                    Ok(Err(e)) => e.into(),
                    Ok(Ok(())) => "gateway stopped before the session was ready".into(),
                    Err(e) => e.into(),
                });
            }
        }

        self.session = Some(Session {
            http,
            shard_manager,
            runner,
        });
        Ok(())
    }

    async fn create_command(&self, command: &SlashCommand) -> Result<RegisteredCommand, PlatformError> {
        let created = Command::create_global_application_command(self.http()?, |c| {
            c.name(command.name).description(command.description)
        })
        .await?;
        Ok(RegisteredCommand {
            id: CommandId(created.id.0),
            name: created.name,
        })
    }

    async fn delete_command(&self, command: &RegisteredCommand) -> Result<(), PlatformError> {
        Command::delete_global_application_command(self.http()?, DiscordCommandId(command.id.0)).await?;
        Ok(())
    }

    fn subscribe(&self, dispatcher: Arc<Dispatcher>) {
        if self.dispatcher.set(dispatcher).is_err() {
            log::warn!("Interaction listener already attached, keeping the first one");
        }
    }

    async fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        session.shard_manager.lock().await.shutdown_all().await;
        match session.runner.await {
            Ok(Ok(())) => log::debug!("Gateway runner stopped"),
            Ok(Err(e)) => log::warn!("Gateway runner stopped with error: {}", e),
            Err(e) => log::warn!("Gateway runner task failed: {}", e),
        }
    }
}
