/// The fixed prompt handed to the answer model: context block between
/// dashed delimiters, the answering instructions, the query, and the
/// final "Answer:" cue. The retrieval core owns only the context string;
/// this template is application policy.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!(
        "Context information is below.\n\
         ---------------------\n\
         {context}\n\
         ---------------------\n\
         Given the context information above I want you to think step by step \
         to answer the query in a crisp manner. In case you don't know the \
         answer, say 'I don't know!'.\n\
         Query: {query}\n\
         Answer: "
    )
}
