use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sketchxp::builtins;
use sketchxp::environment::Environment;
use sketchxp::interpreter::Interpreter;
use sketchxp::parser::parse_program;
use std::panic;
use std::process;

fn main() {
    let result = panic::catch_unwind(|| {
        run_repl();
    });

    if let Err(panic_info) = result {
        eprintln!("The REPL encountered an unexpected error and must exit.");

        if let Some(msg) = panic_info.downcast_ref::<&str>() {
            eprintln!("Error: {msg}");
        } else if let Some(msg) = panic_info.downcast_ref::<String>() {
            eprintln!("Error: {msg}");
        } else {
            eprintln!("Error: Unknown panic occurred");
        }

        process::exit(1);
    }
}

fn run_repl() {
    println!("SketchXP Sketch-Program Interpreter");
    println!("Programs are single parenthesized S-expressions like: (+ 1 2)");
    println!("Drawables from (draw ...) are listed after each result.");
    println!("Type :help for more commands, or Ctrl+C to exit.");
    println!();

    let mut rl = DefaultEditor::new().expect("Could not initialize REPL");
    let mut interpreter = Interpreter::new();

    loop {
        match rl.readline("sketchxp> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Handle special commands
                match line {
                    ":help" => {
                        print_help();
                        continue;
                    }
                    ":env" => {
                        print_environment(interpreter.environment());
                        continue;
                    }
                    ":reset" => {
                        // reset strips everything, including the builtins;
                        // reinstall to get a fresh default world
                        interpreter.environment_mut().reset();
                        builtins::install(interpreter.environment_mut());
                        println!("Environment reset to the default world.");
                        continue;
                    }
                    ":quit" | ":exit" => {
                        println!("Goodbye!");
                        break;
                    }
                    _ => {}
                }

                if !interpreter.parse(line) {
                    // reparse through the Result entry to recover the
                    // message the boolean entry discards
                    if let Err(e) = parse_program(line) {
                        println!("Parse error: {e}");
                    }
                    continue;
                }

                match interpreter.eval() {
                    Ok(result) => {
                        // Don't print None results (e.g., from draw)
                        if !result.is_none() {
                            println!("{result}");
                        }
                        for drawable in interpreter.take_drawables() {
                            println!("draw: {drawable}");
                        }
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }

            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }
}

fn print_help() {
    println!("SketchXP Interpreter:");
    println!("  :help      - Show this help message");
    println!("  :env       - Show current environment bindings");
    println!("  :reset     - Discard all bindings and reinstall the defaults");
    println!("  :quit      - Exit the interpreter");
    println!("  :exit      - Exit the interpreter");
    println!("  Ctrl+C     - Exit the interpreter");
    println!();
    println!("A program is one parenthesized expression:");
    println!("  Numbers: 42, -5, 1e2   Booleans: True, False");
    println!("  Arithmetic: +, -, *, /, pow, log10");
    println!("  Comparison: =, <, >, <=, >=");
    println!("  Logic: and, or, not");
    println!("  Trigonometry: sin, cos, arctan (y, x); pi is predefined");
    println!("  Special forms: (begin ...), (define name expr), (if cond a b)");
    println!("  Geometry: point, line, arc, rect, fill_rect, ellipse");
    println!("  Drawing: (draw expr ...) collects drawables");
    println!();
    println!("Examples:");
    println!("  (begin (define r 50) (draw (point r r)))");
    println!("  (draw (line (point 0 0) (point 100 100)))");
    println!("  (draw (arc (point 0 0) (point 50 0) (/ pi 2)))");
    println!();
}

fn print_environment(env: &Environment) {
    let procedures = env.procedure_names();
    let variables = env.variable_names();

    if procedures.is_empty() && variables.is_empty() {
        println!("Environment is empty.");
        return;
    }

    if !procedures.is_empty() {
        println!("Procedures ({}):", procedures.len());
        // Print in columns for readability
        let mut col = 0;
        for name in procedures {
            print!("  {name:<12}");
            col += 1;
            if col % 5 == 0 {
                println!();
            }
        }
        if col % 5 != 0 {
            println!();
        }
        println!();
    }

    if !variables.is_empty() {
        println!("Variables ({}):", variables.len());
        for name in variables {
            match env.get(name) {
                Ok(value) => println!("  {name} = {value}"),
                Err(_) => println!("  {name}"),
            }
        }
    }
}
