//! Interactive command shell — the thin stand-in for the product's view
//! layer. Maps typed commands onto engine operations, prints the active
//! derived view, and drains notifications after every command. Contains no
//! business logic and never talks to the gateway directly.

use std::io::{self, BufRead, Lines, StdinLock, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use crate::errors::AppError;
use crate::export;
use crate::models::practice::{PracticeSetUpdate, SetOptions};
use crate::models::question::{CategoryGroup, LoadCriteria, Question};
use crate::notify::{Level, Notification};
use crate::practice::{PracticeEngine, ViewSelector};

/// Scores below this land the question in the mistake log automatically.
const MISTAKE_THRESHOLD: u8 = 60;

pub async fn run(engine: &mut PracticeEngine) -> Result<()> {
    println!("IntelliView interview practice — type 'help' for commands.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "quit" | "exit" => break,
            "generate" => cmd_generate(engine, &args, &mut lines).await?,
            "load" => {
                engine.load_questions(&LoadCriteria::default()).await;
                print_view(engine);
            }
            "search" => {
                if args.is_empty() {
                    println!("usage: search <query>");
                } else {
                    engine.search_questions(&args.join(" ")).await;
                    print_view(engine);
                }
            }
            "list" => print_view(engine),
            "show" => cmd_show(engine, &args).await,
            "answer" => cmd_answer(engine, &args, &mut lines).await?,
            "fav" => {
                if let [id] = args[..] {
                    engine.toggle_favorite(id).await;
                } else {
                    println!("usage: fav <question-id>");
                }
            }
            "master" => {
                if let [id] = args[..] {
                    engine.clear_mistake(id).await;
                } else {
                    println!("usage: master <question-id>");
                }
            }
            "mistakes" => print_mistakes(engine),
            "sets" => print_sets(engine),
            "newset" => {
                if args.is_empty() {
                    println!("usage: newset <name>");
                } else {
                    engine
                        .create_practice_set(&args.join(" "), SetOptions::default())
                        .await;
                }
            }
            "renameset" => {
                if args.len() < 2 {
                    println!("usage: renameset <set-id> <new name>");
                } else {
                    let update = PracticeSetUpdate {
                        name: Some(args[1..].join(" ")),
                        is_public: None,
                    };
                    engine.update_practice_set(args[0], update).await;
                }
            }
            "delset" => {
                if let [id] = args[..] {
                    engine.delete_practice_set(id).await;
                } else {
                    println!("usage: delset <set-id>");
                }
            }
            "addto" => cmd_addto(engine, &args).await,
            "view" => cmd_view(engine, &args),
            "filter" => cmd_filter(engine, &args),
            "categories" => {
                for category in engine.categories() {
                    println!("  {category}");
                }
            }
            "copy" => println!("{}", export::format_questions_for_copy(&engine.filtered_questions())),
            "export" => cmd_export(engine, &args),
            "stats" => cmd_stats(engine).await,
            "history" => cmd_history(engine, &args).await,
            other => println!("Unknown command '{other}' — type 'help'"),
        }

        print_notifications(engine.notifications());
    }

    Ok(())
}

fn print_help() {
    println!(
        "commands:\n\
         \x20 generate <resume.pdf>    generate questions from a resume + job description\n\
         \x20 load | search <query>    load or search the question bank\n\
         \x20 list | show <id>         print the active view / one question\n\
         \x20 answer <id>              practice a question and get it scored\n\
         \x20 fav <id>                 toggle favorite\n\
         \x20 mistakes | master <id>   show the mistake log / mark one mastered\n\
         \x20 sets | newset <name>     list / create practice sets\n\
         \x20 renameset <id> <name>    rename a practice set\n\
         \x20 delset <id>              delete a practice set\n\
         \x20 addto <set-id> <q-id>    add a question to a practice set\n\
         \x20 view all|favorites|mistakes|set <id>\n\
         \x20 filter category <name> | filter difficulty <easy|medium|hard> | filter clear\n\
         \x20 categories | copy | export <path> | stats | history [page]\n\
         \x20 quit"
    );
}

async fn cmd_generate(
    engine: &mut PracticeEngine,
    args: &[&str],
    lines: &mut Lines<StdinLock<'_>>,
) -> Result<()> {
    let [path] = args[..] else {
        println!("usage: generate <resume.pdf>");
        return Ok(());
    };
    println!("Paste the job description (finish with an empty line):");
    let job_description = read_block(lines)?;
    if job_description.trim().is_empty() {
        println!("Job description cannot be empty.");
        return Ok(());
    }
    if engine.generate_questions(Path::new(path), &job_description).await {
        print_view(engine);
    }
    Ok(())
}

async fn cmd_show(engine: &mut PracticeEngine, args: &[&str]) {
    let [id] = args[..] else {
        println!("usage: show <question-id>");
        return;
    };
    let Some(question) = engine.question_detail(id).await else {
        return;
    };
    print_question_detail(&question);
}

async fn cmd_answer(
    engine: &mut PracticeEngine,
    args: &[&str],
    lines: &mut Lines<StdinLock<'_>>,
) -> Result<()> {
    let [id] = args[..] else {
        println!("usage: answer <question-id>");
        return Ok(());
    };
    let Some(question) = engine.question_by_id(id) else {
        println!("No question with id '{id}' in the current bank.");
        return Ok(());
    };

    println!("{}", question.text);
    println!("Type your answer (finish with an empty line):");
    let started = Instant::now();
    let answer_text = read_block(lines)?;
    if answer_text.trim().is_empty() {
        println!("Empty answer — nothing submitted.");
        return Ok(());
    }
    let time_spent = started.elapsed().as_secs() as u32;

    let Some(receipt) = engine.submit_answer(id, &answer_text, time_spent).await else {
        return Ok(());
    };
    println!("Submitted. Scoring...");
    let Some(feedback) = engine.score_answer(&receipt.id, id).await else {
        return Ok(());
    };

    println!("score: {}/100", feedback.score);
    println!("  highlights:   {}", feedback.highlights);
    println!("  improvements: {}", feedback.improvements);
    println!("  suggestions:  {}", feedback.suggestions);
    if let Some(follow_up) = &feedback.follow_up_question {
        println!("  follow-up:    {}", follow_up.text);
    }

    if feedback.score < MISTAKE_THRESHOLD {
        engine
            .record_mistake(
                id,
                &answer_text,
                feedback.score,
                &feedback.improvements,
                &question.category,
            )
            .await;
    }
    Ok(())
}

async fn cmd_addto(engine: &mut PracticeEngine, args: &[&str]) {
    let [set_id, question_id] = args[..] else {
        println!("usage: addto <set-id> <question-id>");
        return;
    };
    match engine.add_question_to_set(set_id, question_id).await {
        Ok(_) => {}
        Err(AppError::PracticeSetNotFound(id)) => {
            println!("No practice set with id '{id}'. Try 'sets'.");
        }
        Err(e) => println!("{e}"),
    }
}

fn cmd_view(engine: &mut PracticeEngine, args: &[&str]) {
    let selector = match args {
        ["all"] => Some(ViewSelector::All),
        ["favorites"] => Some(ViewSelector::Favorites),
        ["mistakes"] => Some(ViewSelector::Mistakes),
        ["set", id] => Some(ViewSelector::Set(id.to_string())),
        _ => None,
    };
    match selector {
        Some(view) => {
            engine.set_view(view);
            print_view(engine);
        }
        None => println!("usage: view all|favorites|mistakes|set <id>"),
    }
}

fn cmd_filter(engine: &mut PracticeEngine, args: &[&str]) {
    match args {
        ["clear"] => engine.reset_filters(),
        ["category", rest @ ..] if !rest.is_empty() => {
            let mut filters = engine.filters().clone();
            filters.category = Some(rest.join(" "));
            engine.set_filters(filters);
        }
        ["difficulty", value] => match value.parse() {
            Ok(difficulty) => {
                let mut filters = engine.filters().clone();
                filters.difficulty = Some(difficulty);
                engine.set_filters(filters);
            }
            Err(e) => {
                println!("{e}");
                return;
            }
        },
        _ => {
            println!(
                "usage: filter category <name> | filter difficulty <easy|medium|hard> | filter clear"
            );
            return;
        }
    }
    print_view(engine);
}

fn cmd_export(engine: &PracticeEngine, args: &[&str]) {
    let [path] = args[..] else {
        println!("usage: export <path[.json|.txt]>");
        return;
    };
    let groups = engine.filtered_questions();
    let ids: Vec<String> = groups
        .iter()
        .flat_map(|g| g.questions.iter().map(|q| q.id.clone()))
        .collect();
    let questions = export::collect_by_ids(&groups, &ids);

    let path = Path::new(path);
    let rendered = if path.extension().is_some_and(|ext| ext == "json") {
        export::export_json(&questions)
    } else {
        export::export_text(&questions)
    };
    match rendered.and_then(|contents| export::write_export(path, &contents)) {
        Ok(()) => println!("Exported {} questions to {}", questions.len(), path.display()),
        Err(e) => println!("Export failed: {e}"),
    }
}

async fn cmd_stats(engine: &mut PracticeEngine) {
    let Some(stats) = engine.answer_statistics().await else {
        return;
    };
    println!(
        "answered {} questions, average score {:.1}",
        stats.total_answered, stats.average_score
    );
    for (category, cs) in &stats.category_stats {
        println!(
            "  {category}: {} answered, avg {:.1}, correct rate {:.0}%",
            cs.total_answered,
            cs.average_score,
            cs.correct_rate * 100.0
        );
    }
}

async fn cmd_history(engine: &mut PracticeEngine, args: &[&str]) {
    let page = args
        .first()
        .and_then(|p| p.parse().ok())
        .unwrap_or(1u32);
    let Some(history) = engine.answer_history(page, 20).await else {
        return;
    };
    println!("{} answers (page {}):", history.total, history.page);
    for record in &history.answers {
        println!(
            "  [{}] {} — {}/100 ({})",
            record.submitted_at.format("%Y-%m-%d"),
            record.question_text,
            record.score,
            record.category
        );
    }
}

fn print_view(engine: &PracticeEngine) {
    let view_label = match engine.view() {
        ViewSelector::All => "all".to_string(),
        ViewSelector::Favorites => "favorites".to_string(),
        ViewSelector::Mistakes => "mistakes".to_string(),
        ViewSelector::Set(id) => format!("set {id}"),
    };
    println!(
        "view: {view_label} — {} favorites, {} mistakes, {} sets",
        engine.favorites_count(),
        engine.mistakes().len(),
        engine.practice_sets().len()
    );
    if !engine.has_questions() {
        println!("(no questions loaded — try 'generate <resume.pdf>' or 'load')");
        return;
    }
    let groups = engine.filtered_questions();
    if groups.is_empty() {
        println!("(no questions in this view)");
        return;
    }
    print_groups(engine, &groups);
}

fn print_groups(engine: &PracticeEngine, groups: &[CategoryGroup]) {
    for group in groups {
        println!("{}:", group.category);
        for question in &group.questions {
            let fav = if engine.is_favorite(&question.id) { "★" } else { " " };
            let missed = if engine
                .mistakes()
                .iter()
                .any(|m| m.question_id == question.id)
            {
                "✗"
            } else {
                " "
            };
            println!(
                "  {fav}{missed} [{}] ({}) {}",
                question.id, question.difficulty, question.text
            );
        }
    }
}

fn print_question_detail(question: &Question) {
    println!("[{}] {} ({})", question.id, question.text, question.difficulty);
    println!("category: {}", question.category);
    println!("reference answer:\n  {}", question.reference_answer);
    for resource in &question.resources {
        println!("resource: {} <{}>", resource.text, resource.url);
    }
    for follow_up in &question.follow_ups {
        println!("follow-up: {}", follow_up.text);
    }
}

fn print_mistakes(engine: &PracticeEngine) {
    if engine.mistakes().is_empty() {
        println!("(mistake log is empty)");
        return;
    }
    for entry in engine.mistakes() {
        println!(
            "  [{}] {}/100 ({}) — {}",
            entry.question_id, entry.score, entry.category, entry.feedback
        );
    }
}

fn print_sets(engine: &PracticeEngine) {
    if engine.practice_sets().is_empty() {
        println!("(no practice sets yet — try 'newset <name>')");
        return;
    }
    for set in engine.practice_sets() {
        println!(
            "  [{}] {} — {} questions",
            set.id,
            set.name,
            set.question_ids.len()
        );
    }
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        let tag = match notification.level {
            Level::Success => "ok",
            Level::Error => "error",
            Level::Warning => "warn",
        };
        println!("[{tag}] {}", notification.message);
    }
}

/// Reads lines until the first empty line, joining with newlines.
fn read_block(lines: &mut Lines<StdinLock<'_>>) -> Result<String> {
    let mut collected = Vec::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        collected.push(line);
    }
    Ok(collected.join("\n"))
}
