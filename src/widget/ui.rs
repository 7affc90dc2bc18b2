use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{application, Background, Border, Color, Element, Length, Shadow, Size, Task, Theme};

use crate::domains::chat::Role;
use crate::widget::{ChatWidget, RelayClient};

#[derive(Clone, Debug)]
pub struct WidgetLaunchConfig {
    pub relay_url: String,
}

struct PopchatApp {
    widget: ChatWidget,
    client: RelayClient,
}

#[derive(Clone, Debug)]
enum Message {
    TogglePressed,
    InputChanged(String),
    SendPressed,
    ReplyReady(Result<String, String>),
}

pub fn launch_ui(config: WidgetLaunchConfig) -> iced::Result {
    tracing::info!(relay = %config.relay_url, "starting chat widget");

    let boot_config = config.clone();
    application(
        move || (PopchatApp::new(boot_config.clone()), Task::none()),
        update,
        view,
    )
    .title(app_title)
    .theme(app_theme)
    .window(iced::window::Settings {
        size: Size::new(400.0, 640.0),
        min_size: Some(Size::new(380.0, 600.0)),
        ..Default::default()
    })
    .run()
}

fn app_title(_state: &PopchatApp) -> String {
    "Popchat".to_string()
}

fn app_theme(_state: &PopchatApp) -> Theme {
    Theme::Light
}

impl PopchatApp {
    fn new(config: WidgetLaunchConfig) -> Self {
        Self {
            widget: ChatWidget::new(),
            client: RelayClient::new(&config.relay_url),
        }
    }
}

fn update(state: &mut PopchatApp, message: Message) -> Task<Message> {
    match message {
        Message::TogglePressed => {
            state.widget.toggle();
            Task::none()
        }
        Message::InputChanged(value) => {
            state.widget.set_input(value);
            Task::none()
        }
        Message::SendPressed => {
            let Some(prompt) = state.widget.begin_send() else {
                return Task::none();
            };
            let client = state.client.clone();
            Task::perform(
                async move { client.submit(&prompt).await.map_err(|e| e.to_string()) },
                Message::ReplyReady,
            )
        }
        Message::ReplyReady(result) => {
            state.widget.settle(result);
            Task::none()
        }
    }
}

fn view(state: &PopchatApp) -> Element<'_, Message> {
    let launcher = button(text("💬").size(22))
        .padding([12, 16])
        .style(iced::widget::button::primary)
        .on_press(Message::TogglePressed);

    let body: Element<'_, Message> = if state.widget.is_open() {
        view_popup(state)
    } else {
        Space::new().height(Length::Fill).into()
    };

    column![body, launcher]
        .spacing(12)
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .into()
}

fn view_popup(state: &PopchatApp) -> Element<'_, Message> {
    let header = row![
        text("🤖 Assistant").size(16).color(Color::WHITE),
        Space::new().width(Length::Fill),
        button(text("×").size(18).color(Color::WHITE))
            .padding([2, 10])
            .style(iced::widget::button::text)
            .on_press(Message::TogglePressed),
    ]
    .align_y(iced::Alignment::Center);

    let list = state
        .widget
        .messages()
        .iter()
        .fold(column!().spacing(8).width(Length::Fill), |col, msg| {
            let bubble = container(text(msg.content.as_str()).size(14))
                .padding([8, 12])
                .max_width(280.0)
                .style(match msg.role {
                    Role::User => user_bubble,
                    Role::Assistant | Role::System => assistant_bubble,
                });
            let line: Element<'_, Message> = match msg.role {
                Role::User => row![Space::new().width(Length::Fill), bubble].into(),
                Role::Assistant | Role::System => {
                    row![bubble, Space::new().width(Length::Fill)].into()
                }
            };
            col.push(line)
        });

    let list = if state.widget.is_loading() {
        list.push(row![
            container(text("Typing...").size(13))
                .padding([6, 10])
                .style(assistant_bubble),
            Space::new().width(Length::Fill)
        ])
    } else {
        list
    };

    let composer = row![
        text_input("Type a message...", state.widget.input())
            .on_input(Message::InputChanged)
            .on_submit(Message::SendPressed)
            .padding(10)
            .width(Length::Fill),
        button("Send")
            .padding([8, 14])
            .style(iced::widget::button::primary)
            .on_press_maybe((!state.widget.is_loading()).then_some(Message::SendPressed)),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    container(column![
        container(header).padding(12).style(header_bar),
        scrollable(container(list).padding(12).width(Length::Fill))
            .height(Length::Fill)
            .width(Length::Fill)
            .anchor_bottom()
            .auto_scroll(true),
        container(composer).padding(12),
    ])
    .width(Length::Fixed(340.0))
    .height(Length::Fill)
    .style(popup_panel)
    .into()
}

fn popup_panel(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: None,
        background: Some(Background::Color(Color::WHITE)),
        border: Border {
            radius: 12.0.into(),
            width: 1.0,
            color: Color::from_rgb(0.82, 0.84, 0.86),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn header_bar(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(Color::from_rgb(0.15, 0.39, 0.92))),
        border: Border {
            radius: 12.0.into(),
            width: 0.0,
            color: Color::TRANSPARENT,
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn user_bubble(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(Color::from_rgb(0.23, 0.51, 0.96))),
        border: Border {
            radius: 8.0.into(),
            width: 0.0,
            color: Color::TRANSPARENT,
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn assistant_bubble(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        text_color: Some(Color::from_rgb(0.12, 0.16, 0.22)),
        background: Some(Background::Color(Color::WHITE)),
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: Color::from_rgb(0.90, 0.91, 0.92),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}
