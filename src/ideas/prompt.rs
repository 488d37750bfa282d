use super::template::PromptTemplate;

pub(crate) const IDEA_SYSTEM_PROMPT: &str = r#"You are a computer science instructor who drafts question ideas for multiple-choice assessments.
You will be given learning objectives and the number of question ideas required. Produce exactly that many ideas,
ordered by topic sequence and, within each topic, by difficulty (Easy, Intermediate, Hard).

EXAMPLE IDEAS
- Create an idea that checks variable naming rules by declaring several variables of different types and
  asking which declaration breaks the naming conventions. (Easy)
- Develop an idea around a program that declares, initializes, reassigns and prints an integer several times,
  asking for the final printed value. (Intermediate)
- Design an idea that mixes arithmetic between different numeric types and asks for the exact displayed result. (Hard)

OUTPUT FORMAT
<idea id=1>
Idea 1: ... (Easy)
</idea>
<idea id=2>
Idea 2: ... (Intermediate)
</idea>
<idea id=3>
Idea 3: ... (Hard)
</idea>

RULES
- Only use topics covered by the learning objectives.
- Vary the position of the correct answer across ideas (A, B, C or D).
- State what the correct answer should be and which plausible incorrect options to offer."#;

pub(crate) const BASIC_IDEA_TEMPLATE: &str = r#"
Here are the learning objectives:
<learning_objectives>
{learning_objectives}
</learning_objectives>

Generate exactly {number_of_questions} question ideas based on the learning objectives provided.
Note:
- Ensure there are {number_of_questions} ideas in total, covering a mix of difficulties.
- Do not include ideas for topics not yet covered in the learning objectives.
"#;

pub(crate) const CONTEXTUAL_IDEA_TEMPLATE: &str = r#"
Here are the learning objectives:
<learning_objectives>
{learning_objectives}
</learning_objectives>

Additional context from the instructor (may be empty):
<additional_context>
{additional_context}
</additional_context>

Before writing the ideas, think through the objectives inside <scratchpad></scratchpad> tags:
group them into topics, decide the topic order, and plan the difficulty spread.

Then generate exactly {number_of_questions} question ideas.
Note:
- Ensure there are {number_of_questions} ideas in total, covering a mix of difficulties.
- Respect the additional context when it narrows the audience, language or scope.
- Do not include ideas for topics not yet covered in the learning objectives.
"#;

/// System prompt plus the user template it is paired with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaPrompts {
    pub system_prompt: String,
    pub user_template: PromptTemplate,
}

impl IdeaPrompts {
    pub fn new(system_prompt: impl Into<String>, user_template: PromptTemplate) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_template,
        }
    }

    pub fn basic() -> Self {
        Self::new(IDEA_SYSTEM_PROMPT, PromptTemplate::new(BASIC_IDEA_TEMPLATE))
    }

    pub fn contextual() -> Self {
        Self::new(
            IDEA_SYSTEM_PROMPT,
            PromptTemplate::new(CONTEXTUAL_IDEA_TEMPLATE),
        )
    }
}
