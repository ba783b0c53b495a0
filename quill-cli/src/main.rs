use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quill_client::{
    AuthResponse, Draft, DraftInput, ExportFormat, GenerateInput, GeneratedArticle, NewPost, Post,
    PostList, QuillClient, QuillClientError, RatingSummary, SortOrder,
};
use serde::Serialize;

const TOKEN_FILE: &str = ".quill_token";
const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "QUILL_SERVER";

#[derive(Debug, Parser)]
#[command(name = "quill-cli", version, about = "CLI клиент для quill-server")]
struct Cli {
    /// Адрес сервера; по умолчанию QUILL_SERVER или http://127.0.0.1:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Печатать ответ сервера как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Latest,
    Earliest,
    HighestRated,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Text,
}

#[derive(Debug, clap::Args)]
struct DraftArgs {
    #[arg(long)]
    title: String,
    /// HTML-содержимое.
    #[arg(long, conflicts_with = "content_file")]
    content: Option<String>,
    /// Файл с HTML-содержимым.
    #[arg(long)]
    content_file: Option<PathBuf>,
    #[arg(long)]
    topic: Option<String>,
    #[arg(long)]
    tone: Option<String>,
    #[arg(long)]
    length: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Список своих черновиков (требует токен).
    Drafts {
        #[arg(long, value_enum, default_value = "latest")]
        sort: SortArg,
    },
    /// Черновик по id (требует токен).
    Draft {
        #[arg(long)]
        id: i64,
    },
    /// Создание черновика или, с `--id`, его обновление (требует токен).
    SaveDraft {
        #[arg(long)]
        id: Option<i64>,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Удаление черновика (требует токен).
    DeleteDraft {
        #[arg(long)]
        id: i64,
    },
    /// Публикация черновика как поста (требует токен).
    PublishDraft {
        #[arg(long)]
        id: i64,
    },
    /// Выгрузка черновика в файл (требует токен).
    Export {
        #[arg(long)]
        id: i64,
        #[arg(long, value_enum, default_value = "markdown")]
        format: FormatArg,
        /// Путь к файлу; по умолчанию имя, предложенное сервером.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Лента опубликованных постов.
    Posts {
        #[arg(long, value_enum, default_value = "latest")]
        sort: SortArg,
    },
    /// Пост по id.
    Post {
        #[arg(long)]
        id: i64,
    },
    /// Публикация нового поста (требует токен).
    Publish {
        #[arg(long)]
        title: String,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        slug: Option<String>,
    },
    /// Удаление поста (требует токен).
    DeletePost {
        #[arg(long)]
        id: i64,
    },
    /// Оценка поста от 1 до 5 (требует токен).
    Rate {
        #[arg(long)]
        id: i64,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        value: i64,
    },
    /// Сводка оценок поста.
    Ratings {
        #[arg(long)]
        id: i64,
    },
    /// Генерация статьи (требует токен).
    Generate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        length: Option<String>,
        /// Сразу сохранить результат как черновик.
        #[arg(long)]
        save: bool,
    },
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Latest => SortOrder::Latest,
            SortArg::Earliest => SortOrder::Earliest,
            SortArg::HighestRated => SortOrder::HighestRated,
        }
    }
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => ExportFormat::Markdown,
            FormatArg::Text => ExportFormat::Text,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let mut client = QuillClient::new(server).map_err(map_client_error)?;

    if let Some(token) = load_token().context("не удалось прочитать .quill_token")? {
        client.set_token(token);
    }
    let out = Output { json: cli.json };

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let auth = client
                .register(&username, &email, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            out.auth("Регистрация успешна", &auth)?;
        }
        Command::Login { username, password } => {
            let auth = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            out.auth("Вход выполнен", &auth)?;
        }
        Command::Drafts { sort } => {
            let list = client
                .list_drafts(sort.into())
                .await
                .map_err(map_client_error)?;
            if out.json {
                out.print_json(&list)?;
            } else {
                println!("Черновиков: {}", list.total);
                for draft in &list.drafts {
                    println!("- [{}] {} (изменён {})", draft.id, draft.title, draft.updated_at);
                }
            }
        }
        Command::Draft { id } => {
            let draft = client.get_draft(id).await.map_err(map_client_error)?;
            out.draft("Черновик", &draft)?;
        }
        Command::SaveDraft { id, draft } => {
            let input = draft_input(draft)?;
            let saved = client
                .save_draft(id, &input)
                .await
                .map_err(map_client_error)?;
            let title = if id.is_some() {
                "Черновик обновлён"
            } else {
                "Черновик создан"
            };
            out.draft(title, &saved)?;
        }
        Command::DeleteDraft { id } => {
            client.delete_draft(id).await.map_err(map_client_error)?;
            println!("Черновик удалён: id={id}");
        }
        Command::PublishDraft { id } => {
            let post = client.publish_draft(id).await.map_err(map_client_error)?;
            out.post("Черновик опубликован", &post)?;
        }
        Command::Export { id, format, out: path } => {
            let exported = client
                .export_draft(id, format.into())
                .await
                .map_err(map_client_error)?;
            let path = path.unwrap_or_else(|| PathBuf::from(&exported.filename));
            fs::write(&path, &exported.body)
                .with_context(|| format!("не удалось записать {}", path.display()))?;
            println!("Черновик сохранён в {}", path.display());
        }
        Command::Posts { sort } => {
            let list = client
                .list_posts(sort.into())
                .await
                .map_err(map_client_error)?;
            out.post_list(&list)?;
        }
        Command::Post { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            out.post("Пост", &post)?;
        }
        Command::Publish {
            title,
            content,
            content_file,
            summary,
            slug,
        } => {
            let post = NewPost {
                title,
                content: read_content(content, content_file)?,
                summary,
                slug,
                published: true,
            };
            let post = client.create_post(&post).await.map_err(map_client_error)?;
            out.post("Пост опубликован", &post)?;
        }
        Command::DeletePost { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        Command::Rate { id, value } => {
            let rating = client
                .rate_post(id, value)
                .await
                .map_err(map_client_error)?;
            if out.json {
                out.print_json(&rating)?;
            } else {
                println!("Оценка сохранена: пост {} = {}", rating.post_id, rating.value);
            }
        }
        Command::Ratings { id } => {
            let summary = client.post_ratings(id).await.map_err(map_client_error)?;
            out.ratings(id, &summary)?;
        }
        Command::Generate {
            title,
            topic,
            tone,
            length,
            save,
        } => {
            let input = GenerateInput {
                title,
                topic: topic.clone(),
                tone: tone.clone(),
                length: length.clone(),
            };
            let article = client.generate(&input).await.map_err(map_client_error)?;
            out.article(&article)?;

            if save {
                let draft = DraftInput {
                    title: article.title,
                    content: article.content,
                    topic,
                    tone,
                    length,
                };
                let saved = client
                    .save_draft(None, &draft)
                    .await
                    .map_err(map_client_error)?;
                println!("Сохранено как черновик id={}", saved.id);
            }
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn draft_input(args: DraftArgs) -> Result<DraftInput> {
    Ok(DraftInput {
        title: args.title,
        content: read_content(args.content, args.content_file)?,
        topic: args.topic,
        tone: args.tone,
        length: args.length,
    })
}

fn read_content(inline: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (inline, file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("не удалось прочитать {}", path.display())),
        (None, None) => anyhow::bail!("укажите --content или --content-file"),
    }
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &QuillClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn map_client_error(err: QuillClientError) -> anyhow::Error {
    let message = match err {
        QuillClientError::Unauthorized => {
            "требуется авторизация: выполните `quill-cli login ...` или `quill-cli register ...`"
                .to_string()
        }
        QuillClientError::NotFound => "ресурс не найден".to_string(),
        QuillClientError::Conflict(message) => format!("конфликт: {message}"),
        QuillClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        QuillClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn auth(&self, title: &str, auth: &AuthResponse) -> Result<()> {
        if self.json {
            return self.print_json(auth);
        }
        println!("{title}");
        println!("token: {}", auth.access_token);
        println!("user:");
        println!("  id: {}", auth.user.id);
        println!("  username: {}", auth.user.username);
        println!("  email: {}", auth.user.email);
        println!("  created_at: {}", auth.user.created_at);
        Ok(())
    }

    fn draft(&self, title: &str, draft: &Draft) -> Result<()> {
        if self.json {
            return self.print_json(draft);
        }
        println!("{title}");
        println!("id: {}", draft.id);
        println!("title: {}", draft.title);
        if let Some(topic) = &draft.topic {
            println!("topic: {topic}");
        }
        if let Some(tone) = &draft.tone {
            println!("tone: {tone}");
        }
        if let Some(length) = &draft.length {
            println!("length: {length}");
        }
        println!("updated_at: {}", draft.updated_at);
        println!("content: {}", draft.content);
        Ok(())
    }

    fn post(&self, title: &str, post: &Post) -> Result<()> {
        if self.json {
            return self.print_json(post);
        }
        println!("{title}");
        println!("id: {}", post.id);
        println!("title: {}", post.title);
        println!("slug: {}", post.slug);
        if let Some(summary) = &post.summary {
            println!("summary: {summary}");
        }
        match post.published_at {
            Some(at) => println!("published_at: {at}"),
            None => println!("published: нет"),
        }
        println!("author_id: {}", post.author_id);
        println!("content: {}", post.content);
        Ok(())
    }

    fn post_list(&self, list: &PostList) -> Result<()> {
        if self.json {
            return self.print_json(list);
        }
        println!("Постов: {}", list.total);
        for listed in &list.posts {
            println!(
                "- [{}] {} от {} (рейтинг {:.1}, оценок {})",
                listed.post.id,
                listed.post.title,
                listed.author_username,
                listed.average_rating,
                listed.rating_count
            );
        }
        Ok(())
    }

    fn ratings(&self, post_id: i64, summary: &RatingSummary) -> Result<()> {
        if self.json {
            return self.print_json(summary);
        }
        println!(
            "Пост {post_id}: средняя {:.2}, оценок {}",
            summary.average, summary.count
        );
        if let Some(value) = summary.user_rating {
            println!("Ваша оценка: {value}");
        }
        Ok(())
    }

    fn article(&self, article: &GeneratedArticle) -> Result<()> {
        if self.json {
            return self.print_json(article);
        }
        if article.is_fallback {
            println!("Модель недоступна, получен шаблон статьи");
        }
        println!("title: {}", article.title);
        println!("summary: {}", article.summary);
        println!("{}", article.content);
        Ok(())
    }
}
