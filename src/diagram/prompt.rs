// src/diagram/prompt.rs
// =============================================================================
// The instruction we send to the LLM, with the rendered tree embedded.
// =============================================================================

const PROMPT_HEAD: &str = "# Generate Architecture Diagram from Repository Structure

I have a repository with the following structure:
";

const PROMPT_TAIL: &str = r#"
## Instructions:
Create a clean, well-organized Mermaid architecture diagram based on this repository structure. Your diagram should:

1. Begin EXACTLY with "graph TD" as the first line
2. Group related components into logical subgraphs based on functionality
3. Create explicit nodes for ALL entities that will have relationships
4. Connect only actual nodes (not subgraphs) with descriptive relationship arrows
5. Use proper Mermaid syntax, escaping or renaming file names with special characters
6. Be space-efficient and visually clean
7. Show clear component hierarchies and data flows

Example of good pattern:
graph TD
   %% Component Group
   subgraph "Service Layer"
       ServiceA[Service A] --> |Uses| ServiceB[Service B]
   end

   %% Another component group
   subgraph "Data Layer"
       DB[Database]
       Cache[Cache Service]
   end

   ServiceB --> |Reads from| DB

Return ONLY the raw Mermaid diagram code without any introduction or explanation. The diagram must be valid and renderable by Mermaid.js."#;

/// Wraps the rendered tree text in the diagram instructions
pub fn build_prompt(tree_text: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEAD.len() + tree_text.len() + PROMPT_TAIL.len());
    prompt.push_str(PROMPT_HEAD);
    prompt.push_str(tree_text);
    prompt.push_str(PROMPT_TAIL);
    prompt
}
