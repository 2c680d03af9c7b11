// Command-line front door: cargo run --bin ruby-ast-json -- convert user.rb.ast.json

fn main() {
    ruby_ast_json::cli::run();
}
